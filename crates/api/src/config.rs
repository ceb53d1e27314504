//! Process configuration, read once at startup.

use rand::RngCore;

/// Runtime configuration for the API binary.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub jwt_secret: Vec<u8>,
    pub club_name: String,
}

impl ApiConfig {
    /// Read configuration from the environment.
    ///
    /// `JWT_SECRET` is mandatory. The only escape hatch is `DEV_MODE=true`,
    /// which generates an ephemeral signing key; sessions then die with the
    /// process.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let club_name =
            std::env::var("CLUB_NAME").unwrap_or_else(|_| "Clube Desportivo".to_string());

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ if dev_mode() => {
                tracing::warn!(
                    "JWT_SECRET not set; using an ephemeral dev key, sessions will not survive a restart"
                );
                ephemeral_key()
            }
            _ => anyhow::bail!("JWT_SECRET must be set (or DEV_MODE=true for an ephemeral key)"),
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            club_name,
        })
    }
}

fn dev_mode() -> bool {
    std::env::var("DEV_MODE").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn ephemeral_key() -> Vec<u8> {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    key.to_vec()
}
