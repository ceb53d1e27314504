use core::str::FromStr;

use axum::response::Response;

use clubhouse_auth::{Action, Actor, ResourceSnapshot, can_perform};
use clubhouse_core::DomainError;

use crate::app::errors;
use crate::context::Session;

/// Reject anonymous requests. The session middleware only attaches identity;
/// each handler decides whether it needs one.
pub fn require_actor(session: &Session) -> Result<&Actor, Response> {
    session.actor().ok_or_else(errors::unauthorized)
}

/// Parse a path id, mapping failures to a 400 response.
pub fn parse_id<T>(raw: &str) -> Result<T, Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse().map_err(errors::domain_error_to_response)
}

/// Run the policy check, mapping denial to a uniform 403.
pub fn authorize(
    actor: &Actor,
    action: Action,
    resource: Option<&ResourceSnapshot>,
) -> Result<(), Response> {
    can_perform(actor, action, resource).map_err(|_| errors::forbidden())
}
