use thiserror::Error;

use crate::ability::build_abilities;
use crate::permissions::{Action, Subject};
use crate::SessionUser;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unauthenticated: sign in to continue")]
    Unauthenticated,

    #[error("forbidden: you cannot {action} {subject}")]
    Forbidden { action: Action, subject: Subject },
}

impl AuthzError {
    /// Stable machine-readable code for transports.
    pub fn code(&self) -> &'static str {
        match self {
            AuthzError::Unauthenticated => "unauthenticated",
            AuthzError::Forbidden { .. } => "forbidden",
        }
    }
}

/// Guard for privileged operations: returns the user when allowed.
///
/// Unlike the route gate this fails loudly. A missing user is rejected before
/// any rule is evaluated.
///
/// - No IO
/// - No panics
pub fn assert_can<'a>(
    user: Option<&'a SessionUser>,
    action: Action,
    subject: Subject,
    field: Option<&str>,
) -> Result<&'a SessionUser, AuthzError> {
    let Some(user) = user else {
        return Err(AuthzError::Unauthenticated);
    };

    if build_abilities(Some(user)).cannot(action, subject, field) {
        tracing::warn!(
            user_id = %user.id,
            role = %user.role,
            %action,
            %subject,
            field,
            "authorization denied"
        );
        return Err(AuthzError::Forbidden { action, subject });
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Role};
    use workforce_core::UserId;

    #[test]
    fn missing_user_is_unauthenticated() {
        let err = assert_can(None, Action::Read, Subject::Profile, None).unwrap_err();
        assert_eq!(err, AuthzError::Unauthenticated);
        assert_eq!(err.code(), "unauthenticated");
    }

    #[test]
    fn denied_user_is_forbidden_with_action_and_subject() {
        let user = SessionUser::new(UserId::new(), "e@example.com", "Emp", Role::User)
            .with_category(Category::Employee);

        let err = assert_can(Some(&user), Action::Approve, Subject::UserVerification, None)
            .unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                action: Action::Approve,
                subject: Subject::UserVerification,
            }
        );
        assert_eq!(err.code(), "forbidden");
        let msg = err.to_string();
        assert!(msg.contains("approve"));
        assert!(msg.contains("UserVerification"));
    }

    #[test]
    fn allowed_user_is_returned() {
        let user = SessionUser::new(UserId::new(), "a@example.com", "Admin", Role::Admin);
        let returned = assert_can(Some(&user), Action::Approve, Subject::UserVerification, None)
            .unwrap();
        assert_eq!(returned.id, user.id);
    }
}
