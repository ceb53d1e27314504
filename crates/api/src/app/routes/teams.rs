//! Team CRUD. Reads are public; writes are board tier.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use clubhouse_auth::Action;
use clubhouse_core::TeamId;
use clubhouse_roster::{Team, TeamDraft, TeamPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/:id", get(get_team).put(update_team).delete(delete_team))
}

pub async fn list_teams(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(dto::items_json(&services.store.list_teams())).into_response()
}

pub async fn get_team(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.store.team(id) {
        Ok(team) => Json(team).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_team(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(draft): Json<TeamDraft>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::TeamCreate, None) {
        return resp;
    }

    let team = match Team::create(draft, Utc::now()) {
        Ok(team) => team,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.store.insert_team(team.clone());
    tracing::info!(team = %team.id, "team created");
    (StatusCode::CREATED, Json(team)).into_response()
}

pub async fn update_team(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(patch): Json<TeamPatch>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: TeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.team(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::TeamUpdate, None) {
        return resp;
    }

    match services.store.update_team(id, |team| team.apply(patch)) {
        Ok(team) => Json(team).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_team(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: TeamId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.team(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::TeamDelete, None) {
        return resp;
    }

    match services.store.remove_team(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
