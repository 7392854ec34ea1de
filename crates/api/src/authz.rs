//! API-side guard for privileged operations.
//!
//! Handlers call [`require`] before touching the store; denial becomes a
//! 401/403 JSON response instead of a redirect.

use axum::response::Response;

use workforce_auth::{Action, SessionUser, Subject, assert_can};

use crate::app::errors;
use crate::context::SessionContext;

pub fn require(
    session: &SessionContext,
    action: Action,
    subject: Subject,
) -> Result<SessionUser, Response> {
    assert_can(session.user(), action, subject, None)
        .cloned()
        .map_err(errors::authz_error_to_response)
}
