//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: collaborators shared by middleware and handlers
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: response/query shapes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware;
use crate::session::JwtSessionProvider;
use crate::store::VerificationStore;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig, store: Arc<dyn VerificationStore>) -> Router {
    let sessions = Arc::new(JwtSessionProvider::new(config.session_secret.as_bytes()));
    let services = Arc::new(services::AppServices::new(sessions, store, config.paths.clone()));

    // Page navigations: redirects, never errors.
    let pages = routes::pages::router().layer(axum::middleware::from_fn_with_state(
        services.clone(),
        middleware::route_gate,
    ));

    let admin = routes::admin::router().layer(axum::middleware::from_fn_with_state(
        services.clone(),
        middleware::admin_gate,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(pages)
        .merge(admin)
        .nest("/api", routes::api::router())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services.clone()))
                .layer(axum::middleware::from_fn_with_state(
                    services,
                    middleware::resolve_session,
                )),
        )
}
