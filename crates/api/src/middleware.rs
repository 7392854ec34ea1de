use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use workforce_auth::GateDecision;
use workforce_core::WizardStep;

use crate::app::{dto::WizardQuery, errors, services::AppServices};
use crate::context::SessionContext;

/// Resolve the session once per request and expose it as [`SessionContext`].
pub async fn resolve_session(
    State(services): State<Arc<AppServices>>,
    mut req: Request,
    next: Next,
) -> Response {
    let user = services.sessions.resolve(req.headers()).await;
    req.extensions_mut().insert(SessionContext::new(user));
    next.run(req).await
}

/// Navigation gate for page routes (public / verification flow / protected).
pub async fn route_gate(
    State(services): State<Arc<AppServices>>,
    req: Request,
    next: Next,
) -> Response {
    let session = session_of(&req);
    let path = req.uri().path().to_owned();

    if let GateDecision::Redirect(to) = services.guard.decide(session.user(), &path) {
        return Redirect::to(&to).into_response();
    }

    if let Some(user) = session.user().filter(|_| services.guard.is_wizard(&path)) {
        let requested = Query::<WizardQuery>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(q)| q.step);
        let step = WizardStep::from_query(requested.as_deref());

        let status = match services.store.status(user.id).await {
            Ok(status) => status,
            Err(e) => return errors::store_error_to_response(e),
        };

        if let GateDecision::Redirect(to) = services.guard.wizard(status, step) {
            tracing::debug!(user_id = %user.id, %status, %step, "wizard locked to review");
            return Redirect::to(&to).into_response();
        }
    }

    next.run(req).await
}

/// Admin-area gate: login for anonymous, non-admin home for everyone else.
pub async fn admin_gate(
    State(services): State<Arc<AppServices>>,
    req: Request,
    next: Next,
) -> Response {
    let session = session_of(&req);

    match services.guard.admin(session.user()) {
        GateDecision::Proceed => next.run(req).await,
        GateDecision::Redirect(to) => {
            tracing::debug!(path = req.uri().path(), to = %to, "admin gate redirect");
            Redirect::to(&to).into_response()
        }
    }
}

fn session_of(req: &Request) -> SessionContext {
    req.extensions()
        .get::<SessionContext>()
        .cloned()
        .unwrap_or_else(SessionContext::anonymous)
}
