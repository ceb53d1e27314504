use axum::Router;

pub mod chat;
pub mod common;
pub mod games;
pub mod news;
pub mod payments;
pub mod players;
pub mod session;
pub mod squads;
pub mod system;
pub mod teams;
pub mod users;

/// Router for everything under `/api`.
///
/// Every route passes through the session middleware; which ones require an
/// authenticated actor is decided per handler (public reads stay open).
pub fn router() -> Router {
    Router::new()
        .nest("/auth", session::router())
        .nest("/users", users::router())
        .nest("/teams", teams::router())
        .nest("/players", players::router())
        .nest("/games", games::router())
        .nest("/news", news::router())
        .nest("/payments", payments::router())
        .nest("/squad-teams", squads::router())
        .nest("/messages", chat::router())
}
