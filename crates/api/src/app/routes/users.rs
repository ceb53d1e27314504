//! Member directory and role administration.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::{get, put},
};

use clubhouse_auth::Action;
use clubhouse_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/role", put(assign_role))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
) -> axum::response::Response {
    if let Err(resp) = common::require_actor(&session) {
        return resp;
    }
    let users: Vec<_> = services
        .store
        .list_users()
        .iter()
        .map(dto::user_json)
        .collect();
    Json(serde_json::json!({ "items": users })).into_response()
}

/// Role changes apply to future sessions only; outstanding tokens keep the
/// role they were issued with until they expire.
pub async fn assign_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(body): Json<dto::AssignRoleRequest>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: UserId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.user(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::UserRoleAssign, None) {
        return resp;
    }

    match services.store.update_user_role(id, body.role) {
        Ok(user) => {
            tracing::info!(user = %user.id, role = %user.role.as_str(), "role assigned");
            Json(dto::user_json(&user)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
