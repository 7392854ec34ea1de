//! Identity-verification lifecycle.
//!
//! The status itself is owned by whatever store backs verification records;
//! this module only defines the legal transitions so every store enforces the
//! same state machine.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle state of a user's identity-verification submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Wizard is being filled in.
    #[default]
    Draft,
    /// Handed to reviewers; wizard is read-only.
    Submitted,
    /// Approved by a reviewer. Terminal.
    Verified,
    /// Declined by a reviewer; the user may resubmit.
    Rejected,
    /// A reviewer asked for more information; the user may resubmit.
    InfoRequested,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 5] = [
        VerificationStatus::Draft,
        VerificationStatus::Submitted,
        VerificationStatus::Verified,
        VerificationStatus::Rejected,
        VerificationStatus::InfoRequested,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Draft => "draft",
            VerificationStatus::Submitted => "submitted",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::InfoRequested => "info_requested",
        }
    }

    /// Editable wizard steps are locked once a submission is under review or accepted.
    pub fn locks_wizard(&self) -> bool {
        matches!(self, VerificationStatus::Submitted | VerificationStatus::Verified)
    }

    /// Transition taken when the owner submits the wizard.
    pub fn submit(self) -> DomainResult<Self> {
        match self {
            VerificationStatus::Draft
            | VerificationStatus::InfoRequested
            | VerificationStatus::Rejected => Ok(VerificationStatus::Submitted),
            other => Err(DomainError::invariant(format!(
                "cannot submit a verification in status '{other}'"
            ))),
        }
    }

    /// Transition taken when a reviewer decides on a submission.
    pub fn review(self, decision: ReviewDecision) -> DomainResult<Self> {
        if self != VerificationStatus::Submitted {
            return Err(DomainError::invariant(format!(
                "cannot {decision} a verification in status '{status}'",
                status = self
            )));
        }
        Ok(decision.outcome())
    }
}

impl core::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VerificationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown verification status '{s}'")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Review decisions
// ─────────────────────────────────────────────────────────────────────────────

/// A reviewer's decision on a submitted verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
    RequestInfo,
}

impl ReviewDecision {
    pub fn outcome(&self) -> VerificationStatus {
        match self {
            ReviewDecision::Approve => VerificationStatus::Verified,
            ReviewDecision::Reject => VerificationStatus::Rejected,
            ReviewDecision::RequestInfo => VerificationStatus::InfoRequested,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Approve => "approve",
            ReviewDecision::Reject => "reject",
            ReviewDecision::RequestInfo => "request_info",
        }
    }
}

impl core::fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wizard steps
// ─────────────────────────────────────────────────────────────────────────────

/// Steps of the verification document wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    Education,
    JobHistory,
    IdentityDocument,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::PersonalInfo,
        WizardStep::Education,
        WizardStep::JobHistory,
        WizardStep::IdentityDocument,
        WizardStep::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => "personal_info",
            WizardStep::Education => "education",
            WizardStep::JobHistory => "job_history",
            WizardStep::IdentityDocument => "identity_document",
            WizardStep::Review => "review",
        }
    }

    pub fn first() -> Self {
        WizardStep::PersonalInfo
    }

    /// Resolve the `step` query value; absent or unknown values mean the first step.
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| WizardStep::ALL.into_iter().find(|step| step.as_str() == v))
            .unwrap_or_else(WizardStep::first)
    }

    pub fn is_terminal(&self) -> bool {
        *self == WizardStep::Review
    }

    pub fn next(&self) -> Option<Self> {
        let idx = WizardStep::ALL.iter().position(|s| s == self)?;
        WizardStep::ALL.get(idx + 1).copied()
    }
}

impl core::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
