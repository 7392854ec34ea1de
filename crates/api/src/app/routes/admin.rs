//! Admin review console. Sits behind the admin gate; mutations additionally
//! go through `assert_can` so the rule set stays the source of truth.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use workforce_auth::{Action, Subject};
use workforce_core::{DomainError, ReviewDecision, UserId, VerificationStatus};

use crate::app::dto::AdminConsoleView;
use crate::app::{errors, services::AppServices};
use crate::authz;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/admin", get(console))
        .route("/admin/verifications/:user_id", get(get_verification))
        .route(
            "/admin/verifications/:user_id/:decision",
            post(review),
        )
}

/// GET /admin - submissions waiting for review
pub async fn console(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = authz::require(&session, Action::Read, Subject::UserVerification) {
        return resp;
    }

    match services.store.list_by_status(VerificationStatus::Submitted).await {
        Ok(pending) => Json(AdminConsoleView {
            page: "admin_console",
            pending,
        })
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /admin/verifications/:user_id - one user's verification record
pub async fn get_verification(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(user_id): Path<UserId>,
) -> Response {
    if let Err(resp) = authz::require(&session, Action::Read, Subject::UserVerification) {
        return resp;
    }

    match services.store.get(user_id).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => errors::store_error_to_response(DomainError::NotFound.into()),
        Err(e) => errors::store_error_to_response(e),
    }
}

fn parse_decision(slug: &str) -> Option<ReviewDecision> {
    match slug {
        "approve" => Some(ReviewDecision::Approve),
        "reject" => Some(ReviewDecision::Reject),
        "request-info" => Some(ReviewDecision::RequestInfo),
        _ => None,
    }
}

fn review_action(decision: ReviewDecision) -> Action {
    match decision {
        ReviewDecision::Approve => Action::Approve,
        ReviewDecision::Reject => Action::Reject,
        ReviewDecision::RequestInfo => Action::RequestInfo,
    }
}

/// POST /admin/verifications/:user_id/{approve,reject,request-info}
pub async fn review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path((user_id, slug)): Path<(UserId, String)>,
) -> Response {
    let Some(decision) = parse_decision(&slug) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "unknown review decision");
    };

    let reviewer = match authz::require(&session, review_action(decision), Subject::UserVerification) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match services.store.review(user_id, decision, reviewer.id).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
