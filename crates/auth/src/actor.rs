use clubhouse_core::UserId;

use crate::{Role, SessionClaims};

/// Authenticated identity attached to a request.
///
/// This is a snapshot of the session token's claims, not a live lookup: the
/// role here is the role at token issuance and stays fixed until expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl From<SessionClaims> for Actor {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
