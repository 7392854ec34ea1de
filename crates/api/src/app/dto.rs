use serde::{Deserialize, Serialize};

use workforce_auth::{RawRule, SessionUser};
use workforce_core::{VerificationStatus, WizardStep};

use crate::store::VerificationRecord;

/// Stand-in for a rendered page: which page and for whom.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl PageView {
    pub fn new(page: &'static str, user: Option<&SessionUser>) -> Self {
        Self {
            page,
            user: user.cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerificationStatusView {
    pub page: &'static str,
    pub status: VerificationStatus,
    pub wizard_locked: bool,
}

#[derive(Debug, Serialize)]
pub struct WizardView {
    pub page: &'static str,
    pub step: WizardStep,
    pub next_step: Option<WizardStep>,
    pub status: VerificationStatus,
    pub read_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct WizardQuery {
    pub step: Option<String>,
}

/// Client hydration payload: the session's rules as plain records.
#[derive(Debug, Serialize)]
pub struct AbilitiesResponse {
    pub rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub action: String,
    pub subject: String,
    pub field: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminConsoleView {
    pub page: &'static str,
    pub pending: Vec<VerificationRecord>,
}
