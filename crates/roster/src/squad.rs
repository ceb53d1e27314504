use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_core::{DomainResult, SquadTeamId, TeamId, UserId};

use crate::team::non_empty;

/// Age/category sub-roster (e.g. "Sub-17") under a top-level team.
///
/// At most one coach per squad: the single `coach_id` field is the
/// assignment the authorization policy resolves coach privileges against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadTeam {
    pub id: SquadTeamId,
    pub name: String,
    pub category: String,
    pub association_id: TeamId,
    pub coach_id: Option<UserId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadDraft {
    pub name: String,
    pub category: String,
    pub association_id: TeamId,
    pub coach_id: Option<UserId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SquadPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub coach_id: Option<UserId>,
}

impl SquadTeam {
    pub fn create(draft: SquadDraft, created_by: UserId, now: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id: SquadTeamId::new(),
            name: non_empty(&draft.name, "squad name")?,
            category: non_empty(&draft.category, "category")?,
            association_id: draft.association_id,
            coach_id: draft.coach_id,
            created_by,
            created_at: now,
        })
    }

    pub fn apply(&mut self, patch: SquadPatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = non_empty(&name, "squad name")?;
        }
        if let Some(category) = patch.category {
            self.category = non_empty(&category, "category")?;
        }
        if let Some(coach_id) = patch.coach_id {
            self.coach_id = Some(coach_id);
        }
        Ok(())
    }
}
