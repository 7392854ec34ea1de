//! Page routes. Every handler here sits behind the route gate, so by the time
//! it runs the navigation has already been allowed.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    routing::get,
};

use workforce_core::WizardStep;

use crate::app::dto::{PageView, VerificationStatusView, WizardQuery, WizardView};
use crate::app::{errors, services::AppServices};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(|s: Extension<SessionContext>| page("home", s)))
        .route("/login", get(|s: Extension<SessionContext>| page("login", s)))
        .route("/register", get(|s: Extension<SessionContext>| page("register", s)))
        .route("/forgot-password", get(|s: Extension<SessionContext>| page("forgot_password", s)))
        .route("/reset-password", get(|s: Extension<SessionContext>| page("reset_password", s)))
        .route("/dashboard", get(|s: Extension<SessionContext>| page("dashboard", s)))
        .route("/employees", get(|s: Extension<SessionContext>| page("employees", s)))
        .route("/teams", get(|s: Extension<SessionContext>| page("teams", s)))
        .route("/profile", get(|s: Extension<SessionContext>| page("profile", s)))
        .route("/verification-status", get(verification_status))
        .route("/verification/documents", get(wizard))
}

async fn page(name: &'static str, Extension(session): Extension<SessionContext>) -> Json<PageView> {
    Json(PageView::new(name, session.user()))
}

async fn verification_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    // The gate only lets signed-in users through here.
    let Some(user) = session.user() else {
        return errors::authz_error_to_response(workforce_auth::AuthzError::Unauthenticated);
    };

    match services.store.status(user.id).await {
        Ok(status) => Json(VerificationStatusView {
            page: "verification_status",
            status,
            wizard_locked: status.locks_wizard(),
        })
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn wizard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<WizardQuery>,
) -> Response {
    let Some(user) = session.user() else {
        return errors::authz_error_to_response(workforce_auth::AuthzError::Unauthenticated);
    };

    let step = WizardStep::from_query(query.step.as_deref());
    match services.store.status(user.id).await {
        Ok(status) => Json(WizardView {
            page: "verification_documents",
            step,
            next_step: step.next(),
            status,
            read_only: status.locks_wizard(),
        })
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
