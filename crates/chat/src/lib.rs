//! Channel-gated club messaging.

pub mod message;

pub use message::{Message, RECENT_LIMIT};
