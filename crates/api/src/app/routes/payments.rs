//! Monthly dues ledger. Every verb, reads included, is board tier.

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
use clubhouse_core::{PaymentId, PlayerId};
use clubhouse_ledger::{Payment, PaymentDraft, PaymentPatch, PaymentStatus};
use clubhouse_store::PaymentFilter;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::Session;

use super::common;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route(
            "/:id",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    pub player_id: Option<PlayerId>,
    pub status: Option<PaymentStatus>,
}

pub async fn list_payments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Query(query): Query<PaymentQuery>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::PaymentRead, None) {
        return resp;
    }

    let filter = PaymentFilter {
        player_id: query.player_id,
        status: query.status,
    };
    Json(dto::items_json(&services.store.list_payments(&filter))).into_response()
}

pub async fn get_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: PaymentId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    // The ledger is invisible below board tier, so the permission check runs
    // before the lookup here: a 404 would confirm what exists.
    if let Err(resp) = common::authorize(actor, Action::PaymentRead, None) {
        return resp;
    }
    match services.store.payment(id) {
        Ok(payment) => Json(payment).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(draft): Json<PaymentDraft>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::PaymentCreate, None) {
        return resp;
    }
    if services.store.player(draft.player_id).is_err() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "unknown player");
    }

    let payment = match Payment::create(draft, Utc::now()) {
        Ok(payment) => payment,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.store.insert_payment(payment.clone());
    tracing::info!(payment = %payment.id, player = %payment.player_id, "payment recorded");
    (StatusCode::CREATED, Json(payment)).into_response()
}

pub async fn update_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(patch): Json<PaymentPatch>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: PaymentId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::PaymentUpdate, None) {
        return resp;
    }

    let today = Utc::now().date_naive();
    match services
        .store
        .update_payment(id, |payment| payment.apply(patch, today))
    {
        Ok(payment) => Json(payment).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let actor = match common::require_actor(&session) {
        Ok(actor) => actor,
        Err(resp) => return resp,
    };
    let id: PaymentId = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = common::authorize(actor, Action::PaymentDelete, None) {
        return resp;
    }

    match services.store.remove_payment(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
