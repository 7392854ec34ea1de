use axum::{
    Json,
    extract::{Extension, Query},
    response::{IntoResponse, Response},
};

use workforce_auth::{Action, Subject};

use crate::app::dto::{AbilitiesResponse, ExplainQuery};
use crate::app::errors;
use crate::context::SessionContext;

/// GET /api/abilities - serialized rules for the current session (empty when anonymous)
pub async fn list(Extension(session): Extension<SessionContext>) -> Json<AbilitiesResponse> {
    Json(AbilitiesResponse {
        rules: session.abilities().to_raw_rules(),
    })
}

/// GET /api/abilities/explain - why a query is granted or denied for this session
pub async fn explain(
    Extension(session): Extension<SessionContext>,
    Query(query): Query<ExplainQuery>,
) -> Response {
    let action = match query.action.parse::<Action>() {
        Ok(action) => action,
        Err(e) => return errors::rule_parse_error_to_response(e),
    };
    let subject = match query.subject.parse::<Subject>() {
        Ok(subject) => subject,
        Err(e) => return errors::rule_parse_error_to_response(e),
    };

    let explanation = session
        .abilities()
        .explain(action, subject, query.field.as_deref());

    Json(explanation).into_response()
}
