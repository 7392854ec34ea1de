use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use workforce_core::UserId;

use crate::{Category, Role, SessionUser};

/// Signed session token claims (transport-agnostic).
///
/// The session layer decodes and verifies the token signature; this type only
/// carries what the authorization core needs to build a [`SessionUser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject / user identifier.
    pub sub: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Issued-at, seconds since the epoch.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    /// Expiration, seconds since the epoch.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl SessionClaims {
    pub fn into_user(self) -> SessionUser {
        SessionUser {
            id: self.sub,
            email: self.email,
            name: self.name,
            role: self.role,
            category: self.category,
            verified: self.verified,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("session has expired")]
    Expired,

    #[error("session not yet valid (issued in the future)")]
    NotYetValid,

    #[error("invalid session time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the session time window.
///
/// Signature verification is outside this crate.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn claims(iat: DateTime<Utc>, exp: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            sub: UserId::new(),
            email: "sam@example.com".to_string(),
            name: "Sam".to_string(),
            role: Role::User,
            category: Some(Category::Employer),
            verified: true,
            first_name: Some("Sam".to_string()),
            last_name: Some("Lee".to_string()),
            iat,
            exp,
        }
    }

    #[test]
    fn window_is_checked() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let c = claims(t0, t0 + Duration::minutes(30));

        assert_eq!(validate_claims(&c, t0), Ok(()));
        assert_eq!(
            validate_claims(&c, t0 - Duration::seconds(1)),
            Err(TokenValidationError::NotYetValid)
        );
        assert_eq!(
            validate_claims(&c, t0 + Duration::minutes(30)),
            Err(TokenValidationError::Expired)
        );
        assert_eq!(
            validate_claims(&claims(t0, t0), t0),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn claims_become_a_session_user() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let c = claims(t0, t0 + Duration::hours(1));
        let id = c.sub;

        let user = c.into_user();
        assert_eq!(user.id, id);
        assert_eq!(user.category, Some(Category::Employer));
        assert!(user.verified);
        assert_eq!(user.display_name(), "Sam Lee");
    }

    #[test]
    fn timestamps_are_epoch_seconds() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(claims(t0, t0 + Duration::seconds(60))).unwrap();
        assert_eq!(json["iat"], t0.timestamp());
        assert_eq!(json["exp"], t0.timestamp() + 60);
        assert_eq!(json["role"], "user");
    }
}
