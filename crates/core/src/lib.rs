//! `workforce-core`: shared domain primitives.
//!
//! Identifiers, the domain error model, and the identity-verification
//! lifecycle. No IO lives here.

pub mod error;
pub mod id;
pub mod verification;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use verification::{ReviewDecision, VerificationStatus, WizardStep};
