use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_core::{DomainResult, PlayerId, SquadTeamId, TeamId, UserId};

use crate::team::non_empty;

/// In-squad role designation. Reassignment is president-only.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SquadRole {
    #[default]
    Player,
    Captain,
    TeamDirector,
}

/// A managed player record.
///
/// Distinct from the [`UserId`] identity: a player may or may not have a
/// login. Team and squad links are plain references; deleting the referenced
/// team or squad leaves them dangling (accepted limitation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub user_id: Option<UserId>,
    pub team_id: Option<TeamId>,
    pub squad_team_id: Option<SquadTeamId>,
    pub squad_role: SquadRole,
    pub name: String,
    pub position: String,
    pub jersey_number: Option<u32>,
    pub photo: Option<String>,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub games_played: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerDraft {
    pub user_id: Option<UserId>,
    pub team_id: Option<TeamId>,
    pub name: String,
    pub position: String,
    pub jersey_number: Option<u32>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerPatch {
    pub user_id: Option<UserId>,
    pub team_id: Option<TeamId>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub jersey_number: Option<u32>,
    pub photo: Option<String>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
    pub games_played: Option<u32>,
}

impl Player {
    pub fn create(draft: PlayerDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id: PlayerId::new(),
            user_id: draft.user_id,
            team_id: draft.team_id,
            squad_team_id: None,
            squad_role: SquadRole::default(),
            name: non_empty(&draft.name, "player name")?,
            position: non_empty(&draft.position, "position")?,
            jersey_number: draft.jersey_number,
            photo: draft.photo,
            goals: 0,
            assists: 0,
            yellow_cards: 0,
            red_cards: 0,
            games_played: 0,
            created_at: now,
        })
    }

    pub fn apply(&mut self, patch: PlayerPatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = non_empty(&name, "player name")?;
        }
        if let Some(position) = patch.position {
            self.position = non_empty(&position, "position")?;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = Some(user_id);
        }
        if let Some(team_id) = patch.team_id {
            self.team_id = Some(team_id);
        }
        if let Some(jersey_number) = patch.jersey_number {
            self.jersey_number = Some(jersey_number);
        }
        if let Some(photo) = patch.photo {
            self.photo = Some(photo);
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
        if let Some(assists) = patch.assists {
            self.assists = assists;
        }
        if let Some(yellow_cards) = patch.yellow_cards {
            self.yellow_cards = yellow_cards;
        }
        if let Some(red_cards) = patch.red_cards {
            self.red_cards = red_cards;
        }
        if let Some(games_played) = patch.games_played {
            self.games_played = games_played;
        }
        Ok(())
    }

    /// Place the player on a squad roster. Resets the designation: squad
    /// roles are per-squad, not carried across moves.
    pub fn join_squad(&mut self, squad_id: SquadTeamId) {
        self.squad_team_id = Some(squad_id);
        self.squad_role = SquadRole::default();
    }

    pub fn leave_squad(&mut self) {
        self.squad_team_id = None;
        self.squad_role = SquadRole::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubhouse_core::DomainError;

    fn draft() -> PlayerDraft {
        PlayerDraft {
            user_id: None,
            team_id: None,
            name: "João".to_string(),
            position: "midfielder".to_string(),
            jersey_number: Some(8),
            photo: None,
        }
    }

    #[test]
    fn create_starts_with_zero_stats_and_no_squad() {
        let p = Player::create(draft(), Utc::now()).unwrap();
        assert_eq!(p.goals, 0);
        assert_eq!(p.squad_team_id, None);
        assert_eq!(p.squad_role, SquadRole::Player);
    }

    #[test]
    fn blank_position_is_rejected() {
        let mut d = draft();
        d.position = " ".to_string();
        assert!(matches!(
            Player::create(d, Utc::now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn moving_squads_resets_designation() {
        let mut p = Player::create(draft(), Utc::now()).unwrap();
        p.join_squad(SquadTeamId::new());
        p.squad_role = SquadRole::Captain;

        p.join_squad(SquadTeamId::new());
        assert_eq!(p.squad_role, SquadRole::Player);

        p.squad_role = SquadRole::TeamDirector;
        p.leave_squad();
        assert_eq!(p.squad_team_id, None);
        assert_eq!(p.squad_role, SquadRole::Player);
    }
}
