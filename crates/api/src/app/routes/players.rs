//! Player records. Reads are public; create/delete are board tier, updates
//! are open to any authenticated member (stat entry is shared work).

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;

use clubhouse_auth::Action;
use clubhouse_core::{PlayerId, TeamId};
use clubhouse_roster::{Player, PlayerDraft, PlayerPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route(
            "/:id",
            get(get_player).put(update_player).delete(delete_player),
        )
}

#[derive(Debug, Deserialize)]
pub struct PlayerQuery {
    pub team_id: Option<TeamId>,
}

pub async fn list_players(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<PlayerQuery>,
) -> axum::response::Response {
    Json(dto::items_json(&services.store.list_players(query.team_id))).into_response()
}

pub async fn get_player(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PlayerId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.store.player(id) {
        Ok(player) => Json(player).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_player(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(draft): Json<PlayerDraft>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::PlayerCreate, None) {
        return resp;
    }

    let player = match Player::create(draft, Utc::now()) {
        Ok(player) => player,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.store.insert_player(player.clone());
    tracing::info!(player = %player.id, "player created");
    (StatusCode::CREATED, Json(player)).into_response()
}

pub async fn update_player(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(patch): Json<PlayerPatch>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: PlayerId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.player(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::PlayerUpdate, None) {
        return resp;
    }

    match services.store.update_player(id, |player| player.apply(patch)) {
        Ok(player) => Json(player).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_player(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: PlayerId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.player(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::PlayerDelete, None) {
        return resp;
    }

    match services.store.remove_player(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
