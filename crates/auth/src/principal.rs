use serde::{Deserialize, Serialize};

use workforce_core::UserId;

use crate::{Category, Role};

/// The authenticated identity behind a request.
///
/// Built once per request from the session lookup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub category: Option<Category>,
    /// Whether the user's identity verification has been approved.
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl SessionUser {
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role,
            category: None,
            verified: false,
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Name to show in the UI: "First Last" when both parts are known.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => self.name.clone(),
        }
    }
}
