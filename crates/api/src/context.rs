use clubhouse_auth::Actor;

/// Request identity attached by the session middleware.
///
/// `None` means no `Authorization` header was presented. A header that fails
/// verification never reaches a handler; the middleware rejects it first.
#[derive(Debug, Clone)]
pub struct Session(pub Option<Actor>);

impl Session {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}
