use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_core::{ClubId, UserId};

/// Root scoping entity. Teams, squads, messages and news all belong to
/// exactly one club; the deployment currently seeds a single one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Club {
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ClubId::new(),
            name: name.into(),
            description: None,
            created_by: None,
            created_at: now,
        }
    }
}
