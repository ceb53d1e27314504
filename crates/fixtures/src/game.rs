use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_core::{DomainError, DomainResult, GameId, TeamId};

/// Lifecycle of a fixture. Transitions run forward only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Live,
    Finished,
}

impl GameStatus {
    /// `scheduled -> live -> finished`; restating the current status is a
    /// no-op, everything else is rejected.
    pub fn can_transition_to(self, next: GameStatus) -> bool {
        use GameStatus::*;
        matches!(
            (self, next),
            (Scheduled, Live) | (Live, Finished) | (Scheduled, Scheduled) | (Live, Live) | (Finished, Finished)
        )
    }
}

/// A fixture between two teams.
///
/// Scores are independently settable fields, never derived from the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub game_date: DateTime<Utc>,
    pub location: Option<String>,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameDraft {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub game_date: DateTime<Utc>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamePatch {
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub game_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub status: Option<GameStatus>,
}

impl GamePatch {
    /// Whether applying this patch would change the game's status.
    pub fn changes_status(&self, current: GameStatus) -> bool {
        self.status.is_some_and(|next| next != current)
    }
}

impl Game {
    pub fn create(draft: GameDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.home_team_id == draft.away_team_id {
            return Err(DomainError::validation(
                "home and away team must be different",
            ));
        }
        Ok(Self {
            id: GameId::new(),
            home_team_id: draft.home_team_id,
            away_team_id: draft.away_team_id,
            home_score: None,
            away_score: None,
            game_date: draft.game_date,
            location: draft.location,
            status: GameStatus::Scheduled,
            created_at: now,
        })
    }

    pub fn apply(&mut self, patch: GamePatch) -> DomainResult<()> {
        if let Some(next) = patch.status {
            if !self.status.can_transition_to(next) {
                return Err(DomainError::validation(format!(
                    "cannot move game from {:?} to {next:?}",
                    self.status
                )));
            }
            self.status = next;
        }
        if let Some(home_score) = patch.home_score {
            self.home_score = Some(home_score);
        }
        if let Some(away_score) = patch.away_score {
            self.away_score = Some(away_score);
        }
        if let Some(game_date) = patch.game_date {
            self.game_date = game_date;
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        Ok(())
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == GameStatus::Scheduled && self.game_date > now
    }
}
