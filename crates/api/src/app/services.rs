use std::sync::Arc;

use workforce_auth::{GatePaths, RouteGuard};

use crate::session::SessionProvider;
use crate::store::VerificationStore;

/// Collaborators shared by middleware and handlers.
pub struct AppServices {
    pub sessions: Arc<dyn SessionProvider>,
    pub store: Arc<dyn VerificationStore>,
    pub guard: RouteGuard,
}

impl AppServices {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        store: Arc<dyn VerificationStore>,
        paths: GatePaths,
    ) -> Self {
        Self {
            sessions,
            store,
            guard: RouteGuard::new(paths),
        }
    }
}
