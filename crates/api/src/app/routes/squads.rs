//! Age/category squads and their rosters.
//!
//! Board tier manages everything; a coach gets write access to exactly the
//! squads whose `coach_id` is theirs. Role designation on a roster spot is
//! president only.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;

use clubhouse_auth::{Action, ResourceSnapshot};
use clubhouse_core::{PlayerId, SquadTeamId};
use clubhouse_roster::{SquadDraft, SquadPatch, SquadTeam};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_squads).post(create_squad))
        .route(
            "/:id",
            get(get_squad).put(update_squad).delete(delete_squad),
        )
        .route("/:id/players", get(list_roster))
        .route(
            "/:id/players/:player_id",
            post(add_roster_player).delete(remove_roster_player),
        )
        .route("/:id/players/:player_id/role", put(assign_squad_role))
}

fn snapshot(squad: &SquadTeam) -> ResourceSnapshot {
    ResourceSnapshot::Squad {
        coach_id: squad.coach_id,
    }
}

pub async fn list_squads(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::SquadRead, None) {
        return resp;
    }
    Json(dto::items_json(&services.store.list_squads())).into_response()
}

pub async fn get_squad(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: SquadTeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let squad = match services.store.squad(id) {
        Ok(squad) => squad,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(resp) = common::authorize(actor, Action::SquadRead, None) {
        return resp;
    }
    Json(squad).into_response()
}

/// Players whose roster spot points at this squad.
pub async fn list_roster(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: SquadTeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.squad(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::SquadRead, None) {
        return resp;
    }
    Json(dto::items_json(&services.store.squad_roster(id))).into_response()
}

pub async fn create_squad(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(draft): Json<SquadDraft>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::SquadCreate, None) {
        return resp;
    }
    if services.store.team(draft.association_id).is_err() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "unknown team");
    }

    let squad = match SquadTeam::create(draft, actor.user_id, Utc::now()) {
        Ok(squad) => squad,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.store.insert_squad(squad.clone());
    tracing::info!(squad = %squad.id, "squad created");
    (StatusCode::CREATED, Json(squad)).into_response()
}

pub async fn update_squad(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(patch): Json<SquadPatch>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: SquadTeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let squad = match services.store.squad(id) {
        Ok(squad) => squad,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(resp) = common::authorize(actor, Action::SquadUpdate, Some(&snapshot(&squad))) {
        return resp;
    }

    match services.store.update_squad(id, |squad| squad.apply(patch)) {
        Ok(squad) => Json(squad).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_squad(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: SquadTeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.squad(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::SquadDelete, None) {
        return resp;
    }

    match services.store.remove_squad(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn add_roster_player(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path((id, player_id)): Path<(String, String)>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: SquadTeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let player_id: PlayerId = match common::parse_id(&player_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let squad = match services.store.squad(id) {
        Ok(squad) => squad,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(resp) = common::authorize(actor, Action::SquadRosterManage, Some(&snapshot(&squad)))
    {
        return resp;
    }
    if services.store.player(player_id).is_err() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "unknown player");
    }

    match services.store.update_player(player_id, |player| {
        player.join_squad(id);
        Ok(())
    }) {
        Ok(player) => Json(player).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn remove_roster_player(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path((id, player_id)): Path<(String, String)>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: SquadTeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let player_id: PlayerId = match common::parse_id(&player_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let squad = match services.store.squad(id) {
        Ok(squad) => squad,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(resp) = common::authorize(actor, Action::SquadRosterManage, Some(&snapshot(&squad)))
    {
        return resp;
    }

    let player = match services.store.player(player_id) {
        Ok(player) => player,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if player.squad_team_id != Some(id) {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "player is not on this squad",
        );
    }

    match services.store.update_player(player_id, |player| {
        player.leave_squad();
        Ok(())
    }) {
        Ok(player) => Json(player).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn assign_squad_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path((id, player_id)): Path<(String, String)>,
    Json(body): Json<dto::SquadRoleRequest>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: SquadTeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let player_id: PlayerId = match common::parse_id(&player_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.squad(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::SquadRoleAssign, None) {
        return resp;
    }

    let player = match services.store.player(player_id) {
        Ok(player) => player,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if player.squad_team_id != Some(id) {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "player is not on this squad",
        );
    }

    match services.store.update_player(player_id, |player| {
        player.squad_role = body.squad_role;
        Ok(())
    }) {
        Ok(player) => Json(player).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
