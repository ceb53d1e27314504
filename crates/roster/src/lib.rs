//! Teams, player records and age-category squads.

pub mod player;
pub mod squad;
pub mod team;

pub use player::{Player, PlayerDraft, PlayerPatch, SquadRole};
pub use squad::{SquadDraft, SquadPatch, SquadTeam};
pub use team::{Team, TeamDraft, TeamPatch};
