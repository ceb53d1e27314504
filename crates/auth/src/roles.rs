use core::str::FromStr;

use serde::{Deserialize, Serialize};

use clubhouse_core::DomainError;

/// Club role carried by every user account.
///
/// Roles form a partial hierarchy: president and board share operational
/// privileges, but only the president may reassign squad role designations,
/// and a coach is privileged only over squads they are assigned to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    President,
    Board,
    Coach,
    Player,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::President => "president",
            Role::Board => "board",
            Role::Coach => "coach",
            Role::Player => "player",
        }
    }

    /// President or board: the club-administration tier.
    pub fn is_board_plus(&self) -> bool {
        matches!(self, Role::President | Role::Board)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "president" => Ok(Role::President),
            "board" => Ok(Role::Board),
            "coach" => Ok(Role::Coach),
            "player" => Ok(Role::Player),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}
