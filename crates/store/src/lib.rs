//! In-memory persistence for the club backend.
//!
//! Every collection lives behind its own `RwLock`, so unrelated resources
//! never contend. Handlers clone snapshots out; mutation goes through
//! closures that run while the write lock is held.

pub mod club_store;

pub use club_store::{ClubStore, GameFilter, PaymentFilter};
