//! Session lookup: request headers in, session user (or nothing) out.

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use workforce_auth::{SessionClaims, SessionUser, validate_claims};

/// Cookie carrying the session token for browser navigations.
pub const SESSION_COOKIE: &str = "session";

/// Opaque session capability consumed by the gate.
///
/// Implementations must not fail the request: anything that is not a valid
/// session resolves to `None`.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<SessionUser>;
}

/// HS256-signed session tokens, read from `Authorization: Bearer` or the
/// session cookie.
pub struct JwtSessionProvider {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

impl JwtSessionProvider {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            decoding: DecodingKey::from_secret(secret),
            encoding: EncodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign claims into a session token.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }

    fn decode(&self, token: &str) -> Option<SessionUser> {
        let claims = match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "rejected session token");
                return None;
            }
        };

        if let Err(e) = validate_claims(&claims, Utc::now()) {
            tracing::debug!(error = %e, user_id = %claims.sub, "session outside its time window");
            return None;
        }

        Some(claims.into_user())
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn resolve(&self, headers: &HeaderMap) -> Option<SessionUser> {
        let token = extract_token(headers)?;
        self.decode(token)
    }
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Duration;
    use workforce_auth::{Category, Role};
    use workforce_core::UserId;

    fn claims(valid_for: Duration) -> SessionClaims {
        let now = Utc::now();
        SessionClaims {
            sub: UserId::new(),
            email: "kim@example.com".to_string(),
            name: "Kim".to_string(),
            role: Role::User,
            category: Some(Category::Agency),
            verified: false,
            first_name: None,
            last_name: None,
            iat: now - Duration::seconds(5),
            exp: now + valid_for,
        }
    }

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn bearer_and_cookie_tokens_resolve() {
        let provider = JwtSessionProvider::new(b"secret");
        let claims = claims(Duration::minutes(10));
        let token = provider.issue(&claims).unwrap();

        let from_bearer = provider
            .resolve(&headers(header::AUTHORIZATION, &format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(from_bearer.id, claims.sub);
        assert_eq!(from_bearer.category, Some(Category::Agency));

        let from_cookie = provider
            .resolve(&headers(header::COOKIE, &format!("theme=dark; session={token}")))
            .await
            .unwrap();
        assert_eq!(from_cookie, from_bearer);
    }

    #[tokio::test]
    async fn invalid_tokens_resolve_to_nothing() {
        let provider = JwtSessionProvider::new(b"secret");
        let other = JwtSessionProvider::new(b"other-secret");
        let forged = other.issue(&claims(Duration::minutes(10))).unwrap();
        let expired = provider.issue(&claims(Duration::seconds(-1))).unwrap();

        assert!(provider.resolve(&HeaderMap::new()).await.is_none());
        assert!(
            provider
                .resolve(&headers(header::AUTHORIZATION, &format!("Bearer {forged}")))
                .await
                .is_none()
        );
        assert!(
            provider
                .resolve(&headers(header::AUTHORIZATION, &format!("Bearer {expired}")))
                .await
                .is_none()
        );
        assert!(
            provider
                .resolve(&headers(header::AUTHORIZATION, "Basic abc"))
                .await
                .is_none()
        );
    }
}
