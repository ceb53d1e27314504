use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_core::{ClubId, UserId};

/// A user's participation in a club.
///
/// Kept as a plain association so multi-club support stays a data question;
/// the sample deployment records every registration against the one seeded
/// club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: UserId,
    pub club_id: ClubId,
    pub joined_at: DateTime<Utc>,
}
