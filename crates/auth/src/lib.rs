//! `workforce-auth`: authorization core (pure, no IO).
//!
//! Two halves:
//! - the ability engine (`ability`, `permissions`, `authorize`): which
//!   actions a session user may take on which subjects;
//! - the access gate (`gate`): where a navigation is allowed to land given the
//!   session and the verification lifecycle.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod ability;
pub mod authorize;
pub mod claims;
pub mod gate;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use ability::{AbilityExplanation, AbilitySet, build_abilities};
pub use authorize::{AuthzError, assert_can};
pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use gate::{GateDecision, GatePaths, PathClass, RouteGuard};
pub use permissions::{Action, PermissionRule, RawRule, RuleParseError, Subject};
pub use principal::SessionUser;
pub use roles::{Category, Role};
