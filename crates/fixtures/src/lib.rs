//! Game scheduling and results.

pub mod game;

pub use game::{Game, GameDraft, GamePatch, GameStatus};
