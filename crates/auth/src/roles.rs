use serde::{Deserialize, Serialize};

/// Security role of a session user.
///
/// Only `admin` carries special meaning (it supersedes every category grant).
/// Values outside the known set deserialize to [`Role::Unknown`] and are
/// treated like any other non-admin role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Role {
    Admin,
    User,
    Partner,
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Partner => "partner",
            Role::Unknown => "unknown",
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "user" => Role::User,
            "partner" => Role::Partner,
            _ => Role::Unknown,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for &'static str {
    fn from(value: Role) -> Self {
        value.as_str()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organizational category of a user, distinct from the security [`Role`].
///
/// Unrecognized values deserialize to [`Category::Unknown`], which grants the
/// base rule set only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Category {
    Employee,
    Employer,
    Agency,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Employee => "Employee",
            Category::Employer => "Employer",
            Category::Agency => "Agency",
            Category::Unknown => "Unknown",
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value {
            "Employee" => Category::Employee,
            "Employer" => Category::Employer,
            "Agency" => Category::Agency,
            _ => Category::Unknown,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from(value.as_str())
    }
}

impl From<Category> for &'static str {
    fn from(value: Category) -> Self {
        value.as_str()
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
