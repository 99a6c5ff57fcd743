use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Claims carried by an issued bearer credential.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

/// Signing state for issuing and validating bearer credentials.
///
/// Tokens are HS256, bound to a username, and expire after the configured
/// validity window. There is no refresh mechanism: an expired token means
/// logging in again.
#[derive(Clone)]
pub struct AuthState {
    keys: Arc<AuthKeys>,
}

impl AuthState {
    #[must_use]
    pub fn new(signing_secret: &str, ttl_secs: u64) -> Self {
        Self {
            keys: Arc::new(AuthKeys {
                encoding: EncodingKey::from_secret(signing_secret.as_bytes()),
                decoding: DecodingKey::from_secret(signing_secret.as_bytes()),
                validation: Validation::default(),
                ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
            }),
        }
    }

    /// Issues a signed bearer token bound to `username`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `jsonwebtoken` error if signing fails.
    pub fn issue_token(&self, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_owned(),
            iat: now,
            exp: now + self.keys.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.keys.encoding)
    }

    /// Validates a bearer token, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns the underlying `jsonwebtoken` error for a bad signature,
    /// malformed token, or expired credential.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)
            .map(|data| data.claims)
    }
}

#[derive(Debug, Serialize)]
struct AuthErrorBody {
    error: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware guarding admin endpoints with a bearer credential.
///
/// A missing credential is 401; a present but invalid or expired one is 403.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(req.headers().get(AUTHORIZATION)) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(AuthErrorBody {
                error: "missing bearer token",
            }),
        )
            .into_response();
    };

    match auth.verify_token(token) {
        Ok(_claims) => next.run(req).await,
        Err(error) => {
            tracing::debug!(error = %error, "rejected bearer token");
            (
                StatusCode::FORBIDDEN,
                Json(AuthErrorBody {
                    error: "invalid or expired token",
                }),
            )
                .into_response()
        }
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn extract_bearer_token_rejects_blank_token() {
        let header = HeaderValue::from_static("Bearer   ");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn issued_token_round_trips() {
        let auth = AuthState::new("test-secret", 1800);
        let token = auth.issue_token("admin").expect("issue");
        let claims = auth.verify_token(&token).expect("verify");
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_from_a_different_secret_is_rejected() {
        let issuer = AuthState::new("secret-a", 1800);
        let verifier = AuthState::new("secret-b", 1800);
        let token = issuer.issue_token("admin").expect("issue");
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = AuthState::new("test-secret", 1800);
        // Sign a token that expired well past the default validation leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let auth = AuthState::new("test-secret", 1800);
        assert!(auth.verify_token("not-a-jwt").is_err());
    }
}
