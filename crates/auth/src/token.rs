//! Signed session tokens (HS256).
//!
//! Tokens are issued for a fixed 7-day window and are non-renewable without
//! re-authentication. Verification fails closed: any parse, signature or
//! expiry problem rejects the token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};
use crate::user::User;

/// Fixed session lifetime.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,

    #[error("token has expired")]
    Expired,
}

impl From<TokenValidationError> for TokenError {
    fn from(err: TokenValidationError) -> Self {
        match err {
            TokenValidationError::Expired => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

/// Issues and verifies session tokens with a process-wide signing key.
///
/// The key is injected at construction; key sourcing (configured secret vs
/// ephemeral dev key) is the API configuration's concern.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token embedding the user's id, email and role at this instant.
    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = SessionClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Invalid)
    }

    /// Verify signature and time window, returning the embedded claims.
    ///
    /// Expiry is checked against the supplied clock via [`validate_claims`]
    /// so the window is deterministic under test.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
