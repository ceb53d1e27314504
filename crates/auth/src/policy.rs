//! Authorization policy.
//!
//! Single decision point consulted before every mutating or sensitive read.
//! The whole permission matrix lives here so it is independently testable
//! and no handler compares roles inline.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check over already-loaded data)

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use clubhouse_core::{DomainError, UserId};

use crate::{Actor, Role};

/// Named message partition with its own read/write gate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Open to every authenticated member.
    Geral,
    /// Coaching staff: board tier plus any coach.
    Tecnicos,
    /// Board tier only.
    Diretoria,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Geral => "geral",
            Channel::Tecnicos => "tecnicos",
            Channel::Diretoria => "diretoria",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geral" => Ok(Channel::Geral),
            "tecnicos" => Ok(Channel::Tecnicos),
            "diretoria" => Ok(Channel::Diretoria),
            other => Err(DomainError::validation(format!("unknown channel: {other}"))),
        }
    }
}

/// An operation an authenticated actor is asking to perform.
///
/// Unauthenticated requests never reach the policy: they are rejected by the
/// transport layer with a distinct authentication-required outcome, and fully
/// public reads (teams, players, games, published news) skip it entirely.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    TeamCreate,
    TeamUpdate,
    TeamDelete,

    PlayerCreate,
    /// Observed source behavior: any authenticated user may update a player.
    PlayerUpdate,
    PlayerDelete,

    GameCreate,
    /// Observed source behavior: any authenticated user may update game fields.
    GameUpdate,
    /// Status transitions (scheduled -> live -> finished) are board tier only.
    GameStatusUpdate,
    GameDelete,

    NewsCreate,
    NewsUpdate,
    NewsDelete,
    NewsReadUnpublished,

    PaymentCreate,
    PaymentUpdate,
    PaymentDelete,
    PaymentRead,

    SquadCreate,
    SquadRead,
    /// Board tier, or the coach assigned to this specific squad.
    SquadUpdate,
    SquadDelete,
    /// Add/remove players on a squad roster.
    SquadRosterManage,
    /// Captain / team-director / player designation: president only.
    SquadRoleAssign,

    MessagePost(Channel),
    MessageRead(Channel),
    /// Admin-only hard delete override.
    MessageDelete,

    UserRoleAssign,
}

/// Loaded state of the entity an action targets, where the decision needs it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResourceSnapshot {
    Squad { coach_id: Option<UserId> },
}

/// Every denial is deliberately uniform: no hint of whether the resource
/// exists or which rule failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden")]
    Forbidden,
}

/// Decide whether `actor` may perform `action`, optionally against a loaded
/// resource snapshot.
///
/// Coach privileges over a squad are resolved against the snapshot's
/// `coach_id`, never by role alone: a coach with no snapshot (or someone
/// else's squad) is denied.
pub fn can_perform(
    actor: &Actor,
    action: Action,
    resource: Option<&ResourceSnapshot>,
) -> Result<(), AuthzError> {
    let role = actor.role;
    let allowed = match action {
        Action::TeamCreate | Action::TeamUpdate | Action::TeamDelete => role.is_board_plus(),

        Action::PlayerCreate | Action::PlayerDelete => role.is_board_plus(),
        Action::PlayerUpdate => true,

        Action::GameCreate | Action::GameStatusUpdate | Action::GameDelete => role.is_board_plus(),
        Action::GameUpdate => true,

        Action::NewsCreate
        | Action::NewsUpdate
        | Action::NewsDelete
        | Action::NewsReadUnpublished => true,

        Action::PaymentCreate
        | Action::PaymentUpdate
        | Action::PaymentDelete
        | Action::PaymentRead => role.is_board_plus(),

        Action::SquadCreate | Action::SquadDelete => role.is_board_plus(),
        Action::SquadRead => true,
        Action::SquadUpdate | Action::SquadRosterManage => {
            role.is_board_plus() || is_assigned_coach(actor, resource)
        }
        Action::SquadRoleAssign => role == Role::President,

        Action::MessagePost(channel) | Action::MessageRead(channel) => {
            channel_allows(role, channel)
        }
        Action::MessageDelete => role.is_board_plus(),

        Action::UserRoleAssign => role.is_board_plus(),
    };

    if allowed { Ok(()) } else { Err(AuthzError::Forbidden) }
}

fn is_assigned_coach(actor: &Actor, resource: Option<&ResourceSnapshot>) -> bool {
    actor.role == Role::Coach
        && matches!(
            resource,
            Some(ResourceSnapshot::Squad { coach_id: Some(id) }) if *id == actor.user_id
        )
}

fn channel_allows(role: Role, channel: Channel) -> bool {
    match channel {
        Channel::Geral => true,
        Channel::Tecnicos => role.is_board_plus() || role == Role::Coach,
        Channel::Diretoria => role.is_board_plus(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROLES: [Role; 4] = [Role::President, Role::Board, Role::Coach, Role::Player];

    fn actor(role: Role) -> Actor {
        Actor {
            user_id: UserId::new(),
            email: format!("{role}@club.example"),
            role,
        }
    }

    fn allowed(role: Role, action: Action) -> bool {
        can_perform(&actor(role), action, None).is_ok()
    }

    #[test]
    fn team_game_player_admin_verbs_are_board_tier() {
        for action in [
            Action::TeamCreate,
            Action::TeamUpdate,
            Action::TeamDelete,
            Action::PlayerCreate,
            Action::PlayerDelete,
            Action::GameCreate,
            Action::GameStatusUpdate,
            Action::GameDelete,
            Action::SquadCreate,
            Action::SquadDelete,
            Action::MessageDelete,
            Action::UserRoleAssign,
        ] {
            for role in ROLES {
                assert_eq!(
                    allowed(role, action),
                    role.is_board_plus(),
                    "{role} / {action:?}"
                );
            }
        }
    }

    #[test]
    fn observed_any_authenticated_updates_are_preserved() {
        // Source routes allow any authenticated user here; kept deliberately.
        for action in [Action::PlayerUpdate, Action::GameUpdate] {
            for role in ROLES {
                assert!(allowed(role, action), "{role} / {action:?}");
            }
        }
    }

    #[test]
    fn news_is_open_to_all_authenticated() {
        for action in [
            Action::NewsCreate,
            Action::NewsUpdate,
            Action::NewsDelete,
            Action::NewsReadUnpublished,
        ] {
            for role in ROLES {
                assert!(allowed(role, action));
            }
        }
    }

    #[test]
    fn payments_are_invisible_below_board() {
        for action in [
            Action::PaymentCreate,
            Action::PaymentUpdate,
            Action::PaymentDelete,
            Action::PaymentRead,
        ] {
            assert!(allowed(Role::President, action));
            assert!(allowed(Role::Board, action));
            assert!(!allowed(Role::Coach, action));
            assert!(!allowed(Role::Player, action));
        }
    }

    #[test]
    fn squad_role_designation_is_president_only() {
        assert!(allowed(Role::President, Action::SquadRoleAssign));
        assert!(!allowed(Role::Board, Action::SquadRoleAssign));
        assert!(!allowed(Role::Coach, Action::SquadRoleAssign));
        assert!(!allowed(Role::Player, Action::SquadRoleAssign));
    }

    #[test]
    fn coach_squad_access_requires_assignment() {
        let coach = actor(Role::Coach);
        let own = ResourceSnapshot::Squad {
            coach_id: Some(coach.user_id),
        };
        let other = ResourceSnapshot::Squad {
            coach_id: Some(UserId::new()),
        };
        let unassigned = ResourceSnapshot::Squad { coach_id: None };

        for action in [Action::SquadUpdate, Action::SquadRosterManage] {
            assert!(can_perform(&coach, action, Some(&own)).is_ok());
            assert_eq!(
                can_perform(&coach, action, Some(&other)),
                Err(AuthzError::Forbidden)
            );
            assert_eq!(
                can_perform(&coach, action, Some(&unassigned)),
                Err(AuthzError::Forbidden)
            );
            // No snapshot loaded: fail closed.
            assert_eq!(can_perform(&coach, action, None), Err(AuthzError::Forbidden));
        }
    }

    #[test]
    fn board_manages_squads_without_assignment() {
        let squad = ResourceSnapshot::Squad {
            coach_id: Some(UserId::new()),
        };
        for role in [Role::President, Role::Board] {
            assert!(can_perform(&actor(role), Action::SquadUpdate, Some(&squad)).is_ok());
            assert!(can_perform(&actor(role), Action::SquadRosterManage, None).is_ok());
        }
    }

    #[test]
    fn channel_gates_match_the_table() {
        // (channel, president, board, coach, player)
        let table = [
            (Channel::Geral, true, true, true, true),
            (Channel::Tecnicos, true, true, true, false),
            (Channel::Diretoria, true, true, false, false),
        ];
        for (channel, p, b, c, pl) in table {
            let expected = [p, b, c, pl];
            for (role, want) in ROLES.into_iter().zip(expected) {
                assert_eq!(allowed(role, Action::MessagePost(channel)), want);
                assert_eq!(allowed(role, Action::MessageRead(channel)), want);
            }
        }
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(ROLES.to_vec())
    }

    fn any_simple_action() -> impl Strategy<Value = Action> {
        prop::sample::select(vec![
            Action::TeamCreate,
            Action::TeamUpdate,
            Action::TeamDelete,
            Action::PlayerCreate,
            Action::PlayerUpdate,
            Action::PlayerDelete,
            Action::GameCreate,
            Action::GameUpdate,
            Action::GameStatusUpdate,
            Action::GameDelete,
            Action::NewsCreate,
            Action::NewsUpdate,
            Action::NewsDelete,
            Action::NewsReadUnpublished,
            Action::PaymentCreate,
            Action::PaymentUpdate,
            Action::PaymentDelete,
            Action::PaymentRead,
            Action::SquadCreate,
            Action::SquadRead,
            Action::SquadUpdate,
            Action::SquadDelete,
            Action::SquadRosterManage,
            Action::SquadRoleAssign,
            Action::MessagePost(Channel::Geral),
            Action::MessagePost(Channel::Tecnicos),
            Action::MessagePost(Channel::Diretoria),
            Action::MessageRead(Channel::Geral),
            Action::MessageRead(Channel::Tecnicos),
            Action::MessageRead(Channel::Diretoria),
            Action::MessageDelete,
            Action::UserRoleAssign,
        ])
    }

    proptest! {
        // The president's grants are a superset of every other role's.
        #[test]
        fn president_is_a_superset(role in any_role(), action in any_simple_action()) {
            if allowed(role, action) {
                prop_assert!(allowed(Role::President, action));
            }
        }

        // Board matches president everywhere except squad role designation.
        #[test]
        fn board_equals_president_except_designation(action in any_simple_action()) {
            if action == Action::SquadRoleAssign {
                prop_assert!(allowed(Role::President, action));
                prop_assert!(!allowed(Role::Board, action));
            } else {
                prop_assert_eq!(allowed(Role::Board, action), allowed(Role::President, action));
            }
        }

        // A coach is granted squad writes iff the squad's coach_id is theirs,
        // regardless of what other squads exist.
        #[test]
        fn coach_grant_tracks_assignment(assigned in any::<bool>()) {
            let coach = actor(Role::Coach);
            let coach_id = if assigned { Some(coach.user_id) } else { Some(UserId::new()) };
            let squad = ResourceSnapshot::Squad { coach_id };
            prop_assert_eq!(
                can_perform(&coach, Action::SquadRosterManage, Some(&squad)).is_ok(),
                assigned
            );
        }
    }
}
