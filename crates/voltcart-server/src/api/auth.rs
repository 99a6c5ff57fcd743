//! POST /api/login — issues a bearer credential for the admin identity.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub(super) struct LoginResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

pub(super) async fn login(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<LoginResponse>, ApiError> {
    let body: LoginRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::validation("username and password are required"))?;

    let user = voltcart_db::find_user_by_username(&state.pool, &body.username)
        .await
        .map_err(|e| ApiError::store(&e))?;

    let verified = user
        .as_ref()
        .is_some_and(|user| verify_password(&body.password, &user.password_hash));
    if !verified {
        return Err(ApiError::forbidden("invalid username or password"));
    }

    let access_token = state.auth.issue_token(&body.username).map_err(|error| {
        tracing::error!(error = %error, "failed to sign access token");
        ApiError::internal("failed to issue token")
    })?;

    Ok(Json(LoginResponse { access_token }))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
