use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use workforce_auth::{AuthzError, RuleParseError};
use workforce_core::DomainError;

use crate::store::StoreError;

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    let status = match err {
        AuthzError::Unauthenticated => StatusCode::UNAUTHORIZED,
        AuthzError::Forbidden { .. } => StatusCode::FORBIDDEN,
    };
    json_error(status, err.code(), err.to_string())
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(DomainError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "verification record not found")
        }
        StoreError::Domain(DomainError::InvariantViolation(msg)) => {
            json_error(StatusCode::CONFLICT, "invalid_transition", msg)
        }
        StoreError::Domain(e @ (DomainError::Validation(_) | DomainError::InvalidId(_))) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        }
        StoreError::Unavailable(msg) => {
            tracing::error!(error = %msg, "verification store unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
    }
}

pub fn rule_parse_error_to_response(err: RuleParseError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_rule", err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use workforce_auth::{Action, Subject};

    #[test]
    fn authz_errors_keep_login_and_access_apart() {
        let unauthenticated = authz_error_to_response(AuthzError::Unauthenticated);
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

        let forbidden = authz_error_to_response(AuthzError::Forbidden {
            action: Action::Approve,
            subject: Subject::UserVerification,
        });
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let cases = [
            (StoreError::Domain(DomainError::NotFound), StatusCode::NOT_FOUND),
            (
                StoreError::Domain(DomainError::invariant("nope")),
                StatusCode::CONFLICT,
            ),
            (
                StoreError::Domain(DomainError::validation("bad")),
                StatusCode::BAD_REQUEST,
            ),
            (
                StoreError::Unavailable("down".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(store_error_to_response(err).status(), expected);
        }
    }
}
