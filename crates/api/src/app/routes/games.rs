//! Fixture scheduling and results.
//!
//! Reads are public. Creating and deleting fixtures, and moving them through
//! the lifecycle, is board tier; score/detail entry is open to any
//! authenticated member.

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
use clubhouse_core::{GameId, TeamId};
use clubhouse_fixtures::{Game, GameDraft, GamePatch, GameStatus};
use clubhouse_store::GameFilter;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_games).post(create_game))
        .route("/:id", get(get_game).put(update_game).delete(delete_game))
}

#[derive(Debug, Deserialize)]
pub struct GameQuery {
    pub team_id: Option<TeamId>,
    pub status: Option<GameStatus>,
    pub upcoming: Option<bool>,
}

pub async fn list_games(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<GameQuery>,
) -> axum::response::Response {
    let filter = GameFilter {
        team_id: query.team_id,
        status: query.status,
        upcoming_from: query.upcoming.unwrap_or(false).then(Utc::now),
    };
    Json(dto::items_json(&services.store.list_games(&filter))).into_response()
}

pub async fn get_game(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: GameId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.store.game(id) {
        Ok(game) => Json(game).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_game(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(draft): Json<GameDraft>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::GameCreate, None) {
        return resp;
    }

    let game = match Game::create(draft, Utc::now()) {
        Ok(game) => game,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.store.insert_game(game.clone());
    tracing::info!(game = %game.id, "game scheduled");
    (StatusCode::CREATED, Json(game)).into_response()
}

pub async fn update_game(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(patch): Json<GamePatch>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: GameId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let game = match services.store.game(id) {
        Ok(game) => game,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // A patch that moves the lifecycle needs the stricter grant.
    let action = if patch.changes_status(game.status) {
        Action::GameStatusUpdate
    } else {
        Action::GameUpdate
    };
    if let Err(resp) = common::authorize(actor, action, None) {
        return resp;
    }

    match services.store.update_game(id, |game| game.apply(patch)) {
        Ok(game) => Json(game).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_game(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: GameId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.game(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::GameDelete, None) {
        return resp;
    }

    match services.store.remove_game(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
