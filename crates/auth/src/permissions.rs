//! Permission vocabulary: actions, subjects, and the rules that combine them.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operation verb checked against a subject.
///
/// `Manage` is a wildcard: a rule granting it matches every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Manage,
    Approve,
    Reject,
    RequestInfo,
    Submit,
    Invite,
    Remove,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Manage,
        Action::Approve,
        Action::Reject,
        Action::RequestInfo,
        Action::Submit,
        Action::Invite,
        Action::Remove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
            Action::Approve => "approve",
            Action::Reject => "reject",
            Action::RequestInfo => "request_info",
            Action::Submit => "submit",
            Action::Invite => "invite",
            Action::Remove => "remove",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        *self == Action::Manage
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| RuleParseError::UnknownAction(s.to_string()))
    }
}

/// Domain noun a permission applies to.
///
/// `All` is a wildcard: a rule granting it matches every subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    User,
    Organization,
    Member,
    UserVerification,
    IdentityDocument,
    Education,
    JobHistory,
    Profile,
    VerificationAuditLog,
    Invitation,
    Dashboard,
    #[serde(rename = "all")]
    All,
}

impl Subject {
    pub const ALL: [Subject; 12] = [
        Subject::User,
        Subject::Organization,
        Subject::Member,
        Subject::UserVerification,
        Subject::IdentityDocument,
        Subject::Education,
        Subject::JobHistory,
        Subject::Profile,
        Subject::VerificationAuditLog,
        Subject::Invitation,
        Subject::Dashboard,
        Subject::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::User => "User",
            Subject::Organization => "Organization",
            Subject::Member => "Member",
            Subject::UserVerification => "UserVerification",
            Subject::IdentityDocument => "IdentityDocument",
            Subject::Education => "Education",
            Subject::JobHistory => "JobHistory",
            Subject::Profile => "Profile",
            Subject::VerificationAuditLog => "VerificationAuditLog",
            Subject::Invitation => "Invitation",
            Subject::Dashboard => "Dashboard",
            Subject::All => "all",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        *self == Subject::All
    }
}

impl core::fmt::Display for Subject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subj| subj.as_str() == s)
            .ok_or_else(|| RuleParseError::UnknownSubject(s.to_string()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unknown subject '{0}'")]
    UnknownSubject(String),
}

/// A single grant: `action` on `subject`, optionally narrowed to one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionRule {
    pub action: Action,
    pub subject: Subject,
    /// `None` grants every field of the subject.
    pub field: Option<String>,
}

impl PermissionRule {
    pub fn new(action: Action, subject: Subject) -> Self {
        Self {
            action,
            subject,
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Whether this rule grants `action` on `subject` (and `field`, when asked).
    ///
    /// A field constraint only ever narrows: an unconstrained rule matches any
    /// queried field, and a query without a field matches any rule.
    pub fn matches(&self, action: Action, subject: Subject, field: Option<&str>) -> bool {
        let subject_ok = self.subject.is_wildcard() || self.subject == subject;
        let action_ok = self.action.is_wildcard() || self.action == action;
        let field_ok = match (field, self.field.as_deref()) {
            (None, _) | (_, None) => true,
            (Some(queried), Some(granted)) => queried == granted,
        };
        subject_ok && action_ok && field_ok
    }

    pub fn to_raw(&self) -> RawRule {
        RawRule {
            action: self.action.as_str().to_string(),
            subject: self.subject.as_str().to_string(),
            field: self.field.clone(),
        }
    }
}

impl core::fmt::Display for PermissionRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} {}.{}", self.action, self.subject, field),
            None => write!(f, "{} {}", self.action, self.subject),
        }
    }
}

/// Transport form of a [`PermissionRule`]: plain strings, JSON friendly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRule {
    pub action: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl TryFrom<RawRule> for PermissionRule {
    type Error = RuleParseError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        Ok(Self {
            action: raw.action.parse()?,
            subject: raw.subject.parse()?,
            field: raw.field,
        })
    }
}
