//! Password hashing.
//!
//! Passwords are stored as salted bcrypt hashes and never compared in
//! plaintext. Verification failures of any kind read as "wrong password".

use thiserror::Error;

/// Minimum accepted password length (checked before hashing).
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash,
}

pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).map_err(|_| PasswordError::Hash)
}

/// Re-hash and compare. Malformed stored hashes fail closed.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
