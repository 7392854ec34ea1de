//! Access gate: decides where a navigation may land.
//!
//! Denial is always expressed as a redirect decision, never as an error; the
//! imperative counterpart for mutations is [`crate::assert_can`].

use serde::{Deserialize, Serialize};

use workforce_core::{VerificationStatus, WizardStep};

use crate::SessionUser;

/// Route classes the gate distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathClass {
    Public,
    VerificationFlow,
    Protected,
    Admin,
}

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Redirect(String),
}

impl GateDecision {
    fn redirect(to: &str) -> Self {
        GateDecision::Redirect(to.to_string())
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, GateDecision::Proceed)
    }
}

/// Well-known locations the gate routes between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatePaths {
    pub login: String,
    pub protected_home: String,
    pub verification_status: String,
    pub wizard: String,
    pub non_admin_home: String,
    /// Exact paths reachable without a session.
    pub public: Vec<String>,
    /// Prefix owning the verification flow (status page + wizard).
    pub verification_prefix: String,
    pub admin_prefix: String,
}

impl Default for GatePaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            protected_home: "/dashboard".to_string(),
            verification_status: "/verification-status".to_string(),
            wizard: "/verification/documents".to_string(),
            non_admin_home: "/dashboard".to_string(),
            public: ["/", "/login", "/register", "/forgot-password", "/reset-password"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            verification_prefix: "/verification".to_string(),
            admin_prefix: "/admin".to_string(),
        }
    }
}

/// Route guard over (authenticated?, verified?, path class).
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    paths: GatePaths,
}

impl RouteGuard {
    pub fn new(paths: GatePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &GatePaths {
        &self.paths
    }

    pub fn classify(&self, path: &str) -> PathClass {
        let path = normalize(path);

        if under(path, &self.paths.admin_prefix) {
            PathClass::Admin
        } else if self.paths.public.iter().any(|p| p == path) {
            PathClass::Public
        } else if path == self.paths.verification_status
            || under(path, &self.paths.verification_prefix)
        {
            PathClass::VerificationFlow
        } else {
            PathClass::Protected
        }
    }

    pub fn is_wizard(&self, path: &str) -> bool {
        normalize(path) == self.paths.wizard
    }

    /// Full navigation check for `path`; admin paths go through [`RouteGuard::admin`].
    pub fn decide(&self, user: Option<&SessionUser>, path: &str) -> GateDecision {
        let class = self.classify(path);
        let decision = match class {
            PathClass::Admin => self.admin(user),
            class => self.navigation(user, class),
        };

        tracing::debug!(
            path,
            ?class,
            authenticated = user.is_some(),
            ?decision,
            "route gate decision"
        );
        decision
    }

    /// Decision table for non-admin classes. First match wins.
    pub fn navigation(&self, user: Option<&SessionUser>, class: PathClass) -> GateDecision {
        let paths = &self.paths;
        match (user, class) {
            (None, PathClass::Public) => GateDecision::Proceed,
            (None, _) => GateDecision::redirect(&paths.login),
            (Some(user), PathClass::Public) => {
                if user.verified {
                    GateDecision::redirect(&paths.protected_home)
                } else {
                    GateDecision::redirect(&paths.verification_status)
                }
            }
            (Some(user), PathClass::VerificationFlow) if user.verified => {
                GateDecision::redirect(&paths.protected_home)
            }
            (Some(user), PathClass::Protected) if !user.verified => {
                GateDecision::redirect(&paths.verification_status)
            }
            (Some(_), PathClass::Protected | PathClass::VerificationFlow) => GateDecision::Proceed,
            (Some(user), PathClass::Admin) => self.admin(Some(user)),
        }
    }

    /// Stricter gate for the admin area. Non-admins never learn what lives there.
    pub fn admin(&self, user: Option<&SessionUser>) -> GateDecision {
        match user {
            None => GateDecision::redirect(&self.paths.login),
            Some(user) if !user.is_admin() => GateDecision::redirect(&self.paths.non_admin_home),
            Some(_) => GateDecision::Proceed,
        }
    }

    /// Lock the document wizard to its review step once the record is submitted
    /// or verified. The redirect carries only `step=review`.
    pub fn wizard(&self, status: VerificationStatus, requested: WizardStep) -> GateDecision {
        if status.locks_wizard() && !requested.is_terminal() {
            GateDecision::Redirect(format!("{}?step={}", self.paths.wizard, WizardStep::Review))
        } else {
            GateDecision::Proceed
        }
    }
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}
