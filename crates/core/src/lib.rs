//! `clubhouse-core` — shared identifiers and the domain error model.
//!
//! Everything here is deterministic and IO-free; the other crates build on it.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{
    ClubId, GameId, MessageId, NewsId, PaymentId, PlayerId, SquadTeamId, TeamId, UserId,
};
