use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_core::{DomainError, DomainResult, TeamId};

/// Top-level club representation, also referenced by fixtures.
///
/// The record counters are cumulative and independently settable; nothing
/// derives them from game results automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub logo: Option<String>,
    pub founded: Option<NaiveDate>,
    pub colors: Option<String>,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub created_at: DateTime<Utc>,
}

/// Creation input.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamDraft {
    pub name: String,
    pub logo: Option<String>,
    pub founded: Option<NaiveDate>,
    pub colors: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub founded: Option<NaiveDate>,
    pub colors: Option<String>,
    pub wins: Option<u32>,
    pub draws: Option<u32>,
    pub losses: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
}

impl Team {
    pub fn create(draft: TeamDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = non_empty(&draft.name, "team name")?;
        Ok(Self {
            id: TeamId::new(),
            name,
            logo: draft.logo,
            founded: draft.founded,
            colors: draft.colors,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            created_at: now,
        })
    }

    pub fn apply(&mut self, patch: TeamPatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = non_empty(&name, "team name")?;
        }
        if let Some(logo) = patch.logo {
            self.logo = Some(logo);
        }
        if let Some(founded) = patch.founded {
            self.founded = Some(founded);
        }
        if let Some(colors) = patch.colors {
            self.colors = Some(colors);
        }
        if let Some(wins) = patch.wins {
            self.wins = wins;
        }
        if let Some(draws) = patch.draws {
            self.draws = draws;
        }
        if let Some(losses) = patch.losses {
            self.losses = losses;
        }
        if let Some(goals_for) = patch.goals_for {
            self.goals_for = goals_for;
        }
        if let Some(goals_against) = patch.goals_against {
            self.goals_against = goals_against;
        }
        Ok(())
    }
}

pub(crate) fn non_empty(value: &str, what: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
