use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use clubhouse_auth::{Channel, Role, User};
use clubhouse_chat::{Message, RECENT_LIMIT};
use clubhouse_club::{Club, Membership};
use clubhouse_core::{
    DomainError, DomainResult, GameId, MessageId, NewsId, PaymentId, PlayerId, SquadTeamId,
    TeamId, UserId,
};
use clubhouse_fixtures::{Game, GameStatus};
use clubhouse_ledger::{Payment, PaymentStatus};
use clubhouse_newsdesk::News;
use clubhouse_roster::{Player, SquadTeam, Team};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Optional narrowing of a game listing.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    pub team_id: Option<TeamId>,
    pub status: Option<GameStatus>,
    /// Only games dated from `now` onward, soonest first.
    pub upcoming_from: Option<DateTime<Utc>>,
}

/// Optional narrowing of a payment listing.
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub player_id: Option<PlayerId>,
    pub status: Option<PaymentStatus>,
}

/// All state for one club, each collection behind its own lock.
///
/// Reads clone a snapshot out. Updates run a closure against a copy under
/// the write lock and commit only on success, so a patch that fails partway
/// through leaves the stored entity untouched.
#[derive(Debug)]
pub struct ClubStore {
    club: Club,
    users: RwLock<HashMap<UserId, User>>,
    memberships: RwLock<Vec<Membership>>,
    teams: RwLock<HashMap<TeamId, Team>>,
    players: RwLock<HashMap<PlayerId, Player>>,
    squads: RwLock<HashMap<SquadTeamId, SquadTeam>>,
    games: RwLock<HashMap<GameId, Game>>,
    news: RwLock<HashMap<NewsId, News>>,
    payments: RwLock<HashMap<PaymentId, Payment>>,
    messages: RwLock<Vec<Message>>,
}

macro_rules! keyed_collection {
    ($field:ident, $id:ty, $entity:ty,
     get = $get:ident, insert = $insert:ident, update = $update:ident, remove = $remove:ident) => {
        pub fn $get(&self, id: $id) -> DomainResult<$entity> {
            read(&self.$field)
                .get(&id)
                .cloned()
                .ok_or_else(DomainError::not_found)
        }

        pub fn $insert(&self, entity: $entity) {
            write(&self.$field).insert(entity.id, entity);
        }

        pub fn $update<F>(&self, id: $id, f: F) -> DomainResult<$entity>
        where
            F: FnOnce(&mut $entity) -> DomainResult<()>,
        {
            let mut map = write(&self.$field);
            let entity = map.get_mut(&id).ok_or_else(DomainError::not_found)?;
            let mut updated = entity.clone();
            f(&mut updated)?;
            *entity = updated.clone();
            Ok(updated)
        }

        pub fn $remove(&self, id: $id) -> DomainResult<()> {
            write(&self.$field)
                .remove(&id)
                .map(|_| ())
                .ok_or_else(DomainError::not_found)
        }
    };
}

impl ClubStore {
    pub fn new(club: Club) -> Self {
        Self {
            club,
            users: RwLock::new(HashMap::new()),
            memberships: RwLock::new(Vec::new()),
            teams: RwLock::new(HashMap::new()),
            players: RwLock::new(HashMap::new()),
            squads: RwLock::new(HashMap::new()),
            games: RwLock::new(HashMap::new()),
            news: RwLock::new(HashMap::new()),
            payments: RwLock::new(HashMap::new()),
            messages: RwLock::new(Vec::new()),
        }
    }

    pub fn club(&self) -> &Club {
        &self.club
    }

    // -- users ------------------------------------------------------------

    /// Inserts a user and enrolls them in the club. The email is expected to
    /// arrive normalized (trimmed, lowercased); uniqueness is checked here.
    pub fn insert_user(&self, user: User, now: DateTime<Utc>) -> DomainResult<()> {
        let mut users = write(&self.users);
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("email is already registered"));
        }
        write(&self.memberships).push(Membership {
            user_id: user.id,
            club_id: self.club.id,
            joined_at: now,
        });
        users.insert(user.id, user);
        Ok(())
    }

    pub fn user(&self, id: UserId) -> DomainResult<User> {
        read(&self.users)
            .get(&id)
            .cloned()
            .ok_or_else(DomainError::not_found)
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        read(&self.users).values().find(|u| u.email == email).cloned()
    }

    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = read(&self.users).values().cloned().collect();
        users.sort_by_key(|u| (u.created_at, u.id));
        users
    }

    /// Changes a user's role. Existing session tokens keep the role they
    /// were issued with until they expire.
    pub fn update_user_role(&self, id: UserId, role: Role) -> DomainResult<User> {
        let mut users = write(&self.users);
        let user = users.get_mut(&id).ok_or_else(DomainError::not_found)?;
        user.role = role;
        Ok(user.clone())
    }

    pub fn memberships(&self) -> Vec<Membership> {
        read(&self.memberships).clone()
    }

    // -- teams ------------------------------------------------------------

    keyed_collection!(teams, TeamId, Team,
        get = team, insert = insert_team, update = update_team, remove = remove_team);

    pub fn list_teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = read(&self.teams).values().cloned().collect();
        teams.sort_by_key(|t| (t.created_at, t.id));
        teams
    }

    // -- players ----------------------------------------------------------

    keyed_collection!(players, PlayerId, Player,
        get = player, insert = insert_player, update = update_player, remove = remove_player);

    pub fn list_players(&self, team_id: Option<TeamId>) -> Vec<Player> {
        let mut players: Vec<Player> = read(&self.players)
            .values()
            .filter(|p| team_id.is_none_or(|t| p.team_id == Some(t)))
            .cloned()
            .collect();
        players.sort_by_key(|p| (p.created_at, p.id));
        players
    }

    // -- squads -----------------------------------------------------------

    keyed_collection!(squads, SquadTeamId, SquadTeam,
        get = squad, insert = insert_squad, update = update_squad, remove = remove_squad);

    pub fn list_squads(&self) -> Vec<SquadTeam> {
        let mut squads: Vec<SquadTeam> = read(&self.squads).values().cloned().collect();
        squads.sort_by_key(|s| (s.created_at, s.id));
        squads
    }

    /// Players currently rostered on the given squad.
    pub fn squad_roster(&self, squad_id: SquadTeamId) -> Vec<Player> {
        let mut players: Vec<Player> = read(&self.players)
            .values()
            .filter(|p| p.squad_team_id == Some(squad_id))
            .cloned()
            .collect();
        players.sort_by_key(|p| (p.created_at, p.id));
        players
    }

    // -- games ------------------------------------------------------------

    keyed_collection!(games, GameId, Game,
        get = game, insert = insert_game, update = update_game, remove = remove_game);

    pub fn list_games(&self, filter: &GameFilter) -> Vec<Game> {
        let mut games: Vec<Game> = read(&self.games)
            .values()
            .filter(|g| {
                filter
                    .team_id
                    .is_none_or(|t| g.home_team_id == t || g.away_team_id == t)
            })
            .filter(|g| filter.status.is_none_or(|s| g.status == s))
            .filter(|g| filter.upcoming_from.is_none_or(|now| g.is_upcoming(now)))
            .cloned()
            .collect();
        games.sort_by_key(|g| (g.game_date, g.id));
        games
    }

    // -- news -------------------------------------------------------------

    keyed_collection!(news, NewsId, News,
        get = news_item, insert = insert_news, update = update_news, remove = remove_news);

    /// Newest first. `published_only` is the anonymous-reader view.
    pub fn list_news(&self, published_only: bool) -> Vec<News> {
        let mut items: Vec<News> = read(&self.news)
            .values()
            .filter(|n| !published_only || n.published)
            .cloned()
            .collect();
        items.sort_by_key(|n| (std::cmp::Reverse(n.created_at), n.id));
        items
    }

    // -- payments ---------------------------------------------------------

    keyed_collection!(payments, PaymentId, Payment,
        get = payment, insert = insert_payment, update = update_payment, remove = remove_payment);

    pub fn list_payments(&self, filter: &PaymentFilter) -> Vec<Payment> {
        let mut payments: Vec<Payment> = read(&self.payments)
            .values()
            .filter(|p| filter.player_id.is_none_or(|id| p.player_id == id))
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        payments.sort_by_key(|p| (p.year, p.month, p.id));
        payments
    }

    // -- messages ---------------------------------------------------------

    pub fn append_message(&self, message: Message) {
        write(&self.messages).push(message);
    }

    /// The most recent messages in a channel, newest first, capped at
    /// [`RECENT_LIMIT`].
    pub fn recent_messages(&self, channel: Channel) -> Vec<Message> {
        read(&self.messages)
            .iter()
            .rev()
            .filter(|m| m.channel == channel)
            .take(RECENT_LIMIT)
            .cloned()
            .collect()
    }

    pub fn message(&self, id: MessageId) -> DomainResult<Message> {
        read(&self.messages)
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(DomainError::not_found)
    }

    pub fn remove_message(&self, id: MessageId) -> DomainResult<()> {
        let mut messages = write(&self.messages);
        let position = messages
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(DomainError::not_found)?;
        messages.remove(position);
        Ok(())
    }
}
