//! Club news feed.
//!
//! Published items are world-readable. Unpublished drafts require a session;
//! an anonymous reader asking for one gets 401, not 404, so a draft's
//! existence is only confirmed to members.

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
use clubhouse_core::NewsId;
use clubhouse_newsdesk::{News, NewsDraft, NewsPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_news).post(create_news))
        .route("/:id", get(get_news).put(update_news).delete(delete_news))
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub published: Option<bool>,
}

pub async fn list_news(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Query(query): Query<NewsQuery>,
) -> axum::response::Response {
    let published_only = match session.actor() {
        Some(_) => query.published.unwrap_or(false),
        None => true,
    };
    Json(dto::items_json(&services.store.list_news(published_only))).into_response()
}

pub async fn get_news(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: NewsId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let item = match services.store.news_item(id) {
        Ok(item) => item,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if !item.published {
        let actor = match common::require_actor(&session) {
            Ok(actor) => actor,
            Err(resp) => return resp,
        };
        if let Err(resp) = common::authorize(actor, Action::NewsReadUnpublished, None) {
            return resp;
        }
    }
    Json(item).into_response()
}

pub async fn create_news(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(draft): Json<NewsDraft>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::NewsCreate, None) {
        return resp;
    }

    let item = match News::create(draft, actor.user_id, Utc::now()) {
        Ok(item) => item,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.store.insert_news(item.clone());
    tracing::info!(news = %item.id, "news item created");
    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn update_news(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(patch): Json<NewsPatch>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: NewsId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.news_item(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::NewsUpdate, None) {
        return resp;
    }

    match services.store.update_news(id, |item| item.apply(patch)) {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_news(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: NewsId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = services.store.news_item(id) {
        return errors::domain_error_to_response(e);
    }
    if let Err(resp) = common::authorize(actor, Action::NewsDelete, None) {
        return resp;
    }

    match services.store.remove_news(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
