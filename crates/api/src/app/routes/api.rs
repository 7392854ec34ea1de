//! JSON endpoints under `/api`. No redirects here: denial is 401/403.

use axum::{
    Router,
    routing::{get, post},
};

use super::{abilities, verification};

pub fn router() -> Router {
    Router::new()
        .route("/abilities", get(abilities::list))
        .route("/abilities/explain", get(abilities::explain))
        .route("/verification", get(verification::current))
        .route("/verification/submit", post(verification::submit))
}
