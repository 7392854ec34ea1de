use workforce_auth::{AbilitySet, SessionUser, build_abilities};

/// Session resolved for a request (possibly anonymous).
///
/// Inserted into request extensions by the session middleware; immutable for
/// the rest of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    user: Option<SessionUser>,
}

impl SessionContext {
    pub fn new(user: Option<SessionUser>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn abilities(&self) -> AbilitySet {
        build_abilities(self.user())
    }
}
