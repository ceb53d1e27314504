use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use clubhouse_auth::Actor;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::Session;

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

/// Attach the request identity.
///
/// No `Authorization` header leaves the request anonymous; handlers that need
/// an actor reject that themselves. A header that is present but malformed,
/// forged or expired is rejected here with 401 regardless of the route.
pub async fn session_middleware(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = match req.headers().get(axum::http::header::AUTHORIZATION) {
        None => Session::anonymous(),
        Some(header) => {
            let token = header
                .to_str()
                .ok()
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|t| !t.is_empty());
            let Some(token) = token else {
                return errors::unauthorized();
            };
            match state.services.tokens.verify(token, Utc::now()) {
                Ok(claims) => Session(Some(Actor::from(claims))),
                Err(err) => {
                    tracing::debug!(error = %err, "rejected session token");
                    return errors::unauthorized();
                }
            }
        }
    };

    req.extensions_mut().insert(session);
    next.run(req).await
}
