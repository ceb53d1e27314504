//! Registration, login and session introspection.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use clubhouse_auth::{Registration, User, hash_password, verify_password};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", post(logout))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    let registration = Registration::from(body);
    let email = match registration.validate() {
        Ok(email) => email,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let password_hash = match hash_password(&registration.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "password hashing failed");
            return errors::internal();
        }
    };

    let now = Utc::now();
    let user = User::from_registration(&registration, email, password_hash, now);
    if let Err(e) = services.store.insert_user(user.clone(), now) {
        return errors::domain_error_to_response(e);
    }

    let token = match services.tokens.issue(&user, now) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            return errors::internal();
        }
    };

    tracing::info!(user = %user.id, role = %user.role.as_str(), "user registered");
    (StatusCode::CREATED, Json(dto::session_json(&token, &user))).into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let email = body.email.trim().to_lowercase();

    // Unknown email and wrong password are indistinguishable on the wire.
    let Some(user) = services.store.user_by_email(&email) else {
        return errors::invalid_credentials();
    };
    if !verify_password(&body.password, &user.password_hash) {
        return errors::invalid_credentials();
    }

    let now = Utc::now();
    let token = match services.tokens.issue(&user, now) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            return errors::internal();
        }
    };

    tracing::info!(user = %user.id, "user logged in");
    Json(dto::session_json(&token, &user)).into_response()
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    match services.store.user(actor.user_id) {
        Ok(user) => Json(dto::user_json(&user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Sessions are stateless bearer tokens; logout is client-side discard. The
/// endpoint exists so clients have something to call.
pub async fn logout(Extension(session): Extension<Session>) -> axum::response::Response {
    if let Err(resp) = common::require_actor(&session) {
        return resp;
    }
    Json(serde_json::json!({ "message": "logged out" })).into_response()
}
