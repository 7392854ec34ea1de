use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    response::{IntoResponse, Response},
};

use workforce_auth::{Action, Subject};

use crate::app::{errors, services::AppServices};
use crate::authz;
use crate::context::SessionContext;
use crate::store::VerificationRecord;

/// GET /api/verification - the caller's own verification record
pub async fn current(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    let user = match authz::require(&session, Action::Read, Subject::UserVerification) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match services.store.get(user.id).await {
        Ok(record) => Json(record.unwrap_or_else(|| VerificationRecord::draft(user.id))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /api/verification/submit - hand the wizard to reviewers
pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    let user = match authz::require(&session, Action::Submit, Subject::UserVerification) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match services.store.submit(user.id).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
