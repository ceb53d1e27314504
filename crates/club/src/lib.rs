//! The club itself and user participation in it.

pub mod club;
pub mod membership;

pub use club::Club;
pub use membership::Membership;
