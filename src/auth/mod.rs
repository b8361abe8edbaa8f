use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed token: {0}")]
    Malformed(#[from] jsonwebtoken::errors::Error),
}

/// Source of bearer tokens for API requests.
///
/// Login and refresh happen elsewhere; the client only asks for the
/// current token and reports when the API rejected it.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>, AuthError>;

    /// Called after the API answered 401.
    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Requests go out without an `Authorization` header.
pub struct NoToken;

#[async_trait]
impl TokenProvider for NoToken {
    async fn access_token(&self) -> Result<Option<String>, AuthError> {
        Ok(None)
    }
}

/// Fixed token held in memory; signing out forgets it.
pub struct StaticToken {
    token: RwLock<Option<String>>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<Option<String>, AuthError> {
        self.token
            .read()
            .map(|t| t.clone())
            .map_err(|_| AuthError::Unavailable("token lock poisoned".to_string()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut token = self
            .token
            .write()
            .map_err(|_| AuthError::Unavailable("token lock poisoned".to_string()))?;
        *token = None;
        Ok(())
    }
}

/// Subset of identity-provider claims worth showing to a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub preferred_username: Option<String>,
    pub iss: Option<String>,
    pub exp: Option<i64>,
    pub iat: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map(|exp| exp <= now).unwrap_or(false)
    }
}

/// Read the claims of a JWT without checking its signature.
///
/// The signing keys belong to the identity provider; this is only for
/// displaying who a stored token belongs to and when it expires.
pub fn inspect_token(token: &str) -> Result<TokenClaims, AuthError> {
    let header = decode_header(token)?;
    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(claims: &TokenClaims) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(b"not-the-real-key")).unwrap()
    }

    #[test]
    fn inspect_reads_claims_without_the_key() {
        let claims = TokenClaims {
            sub: Some("user-1".into()),
            name: Some("Ana".into()),
            exp: Some(1_900_000_000),
            ..Default::default()
        };
        let read = inspect_token(&token(&claims)).unwrap();
        assert_eq!(read.sub.as_deref(), Some("user-1"));
        assert_eq!(read.name.as_deref(), Some("Ana"));
        assert_eq!(read.expires_at().unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn expiry_check() {
        let claims = TokenClaims { exp: Some(1_000), ..Default::default() };
        assert!(claims.is_expired_at(Utc::now()));
        assert!(!TokenClaims::default().is_expired_at(Utc::now()));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(inspect_token("not.a.jwt"), Err(AuthError::Malformed(_))));
    }

    #[tokio::test]
    async fn static_token_forgets_on_sign_out() {
        let provider = StaticToken::new("abc");
        assert_eq!(provider.access_token().await.unwrap().as_deref(), Some("abc"));
        provider.sign_out().await.unwrap();
        assert_eq!(provider.access_token().await.unwrap(), None);
        assert_eq!(NoToken.access_token().await.unwrap(), None);
    }
}
