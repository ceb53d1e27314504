//! Service wiring shared by every handler.

use chrono::Utc;

use clubhouse_auth::TokenService;
use clubhouse_club::Club;
use clubhouse_store::ClubStore;

use crate::config::ApiConfig;

/// Everything handlers need, injected as one `Extension`.
pub struct AppServices {
    pub store: ClubStore,
    pub tokens: TokenService,
}

/// Wire up the store (with the single seeded club) and the token service.
pub fn build_services(config: &ApiConfig) -> AppServices {
    let club = Club::new(config.club_name.clone(), Utc::now());
    tracing::info!(club = %club.name, id = %club.id, "seeded club");
    AppServices {
        store: ClubStore::new(club),
        tokens: TokenService::new(&config.jwt_secret),
    }
}
