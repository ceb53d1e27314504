//! Channel-gated messaging.
//!
//! Channel access is resolved by the policy per role; history reads return
//! the newest messages first, bounded by [`clubhouse_chat::RECENT_LIMIT`].

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use chrono::Utc;

use clubhouse_auth::{Action, Channel};
use clubhouse_chat::Message;
use clubhouse_core::MessageId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/:channel", get(list_messages).post(post_message))
        .route("/:channel/:id", delete(delete_message))
}

pub async fn list_messages(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(channel): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let channel: Channel = match channel.parse() {
        Ok(channel) => channel,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(resp) = common::authorize(actor, Action::MessageRead(channel), None) {
        return resp;
    }

    Json(dto::items_json(&services.store.recent_messages(channel))).into_response()
}

pub async fn post_message(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(channel): Path<String>,
    Json(body): Json<dto::PostMessageRequest>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let channel: Channel = match channel.parse() {
        Ok(channel) => channel,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(resp) = common::authorize(actor, Action::MessagePost(channel), None) {
        return resp;
    }

    let sender_name = services
        .store
        .user(actor.user_id)
        .ok()
        .and_then(|u| u.full_name)
        .unwrap_or_else(|| actor.email.clone());

    let message = match Message::compose(
        services.store.club().id,
        channel,
        actor.user_id,
        sender_name,
        &body.content,
        Utc::now(),
    ) {
        Ok(message) => message,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.store.append_message(message.clone());
    (StatusCode::CREATED, Json(message)).into_response()
}

pub async fn delete_message(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path((channel, id)): Path<(String, String)>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let channel: Channel = match channel.parse() {
        Ok(channel) => channel,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let id: MessageId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let message = match services.store.message(id) {
        Ok(message) => message,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if message.channel != channel {
        return errors::domain_error_to_response(clubhouse_core::DomainError::not_found());
    }
    if let Err(resp) = common::authorize(actor, Action::MessageDelete, None) {
        return resp;
    }

    match services.store.remove_message(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
