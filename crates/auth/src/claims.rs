use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use clubhouse_core::UserId;

use crate::Role;

/// Session token claims.
///
/// `iat`/`exp` are UNIX-epoch seconds (JWT-native). The role is embedded at
/// issuance and deliberately not re-checked against the store on verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user id.
    pub sub: UserId,

    /// Email at issuance time.
    pub email: String,

    /// Role at issuance time (snapshot semantics).
    pub role: Role,

    /// Issued-at, epoch seconds.
    pub iat: i64,

    /// Expiration, epoch seconds.
    pub exp: i64,
}

impl SessionClaims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate session claims against a clock value.
///
/// Signature verification / decoding happens in [`crate::TokenService`]; this
/// checks the claims only, so expiry behavior is testable without real time.
pub fn validate_claims(
    claims: &SessionClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(iat: i64, exp: i64) -> SessionClaims {
        SessionClaims {
            sub: UserId::new(),
            email: "a@example.com".to_string(),
            role: Role::Player,
            iat,
            exp,
        }
    }

    #[test]
    fn valid_window_passes() {
        let now = Utc::now();
        let c = claims(now.timestamp() - 10, now.timestamp() + 10);
        assert!(validate_claims(&c, now).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let c = claims(now.timestamp() - 100, now.timestamp() - 1);
        assert_eq!(
            validate_claims(&c, now),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn future_token_is_rejected() {
        let now = Utc::now();
        let c = claims(now.timestamp() + 60, now.timestamp() + 120);
        assert_eq!(
            validate_claims(&c, now),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let now = Utc::now();
        let c = claims(now.timestamp(), now.timestamp());
        assert_eq!(
            validate_claims(&c, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
