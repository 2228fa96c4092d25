use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::WebError;

/// Identity carried by a scouting account's bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: AuthUser,
    pub exp: usize,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Verifies HS256 tokens issued by the account service
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims.user)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid bearer token and makes the caller's
/// [`AuthUser`] available to handlers as a request extension.
pub async fn require_auth(
    State(verifier): State<TokenVerifier>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;

    let user = verifier.verify(token).inspect_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token(secret: &str, exp: usize) -> String {
        let claims = Claims {
            user: AuthUser {
                username: "alice".to_string(),
                is_admin: true,
            },
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_an_hour() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_verify_accepts_token_signed_with_secret() {
        let verifier = TokenVerifier::from_secret("s3cret");
        let user = verifier.verify(&token("s3cret", in_an_hour())).unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.is_admin);
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let verifier = TokenVerifier::from_secret("s3cret");
        assert!(verifier.verify(&token("other", in_an_hour())).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let verifier = TokenVerifier::from_secret("s3cret");
        let expired = (chrono::Utc::now().timestamp() - 3600) as usize;
        assert!(verifier.verify(&token("s3cret", expired)).is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn test_claims_use_camel_case_admin_flag() {
        let claims: Claims = serde_json::from_str(
            r#"{"user": {"username": "bob", "isAdmin": false}, "exp": 1}"#,
        )
        .unwrap();
        assert_eq!(claims.user.username, "bob");
        assert!(!claims.user.is_admin);
    }
}
