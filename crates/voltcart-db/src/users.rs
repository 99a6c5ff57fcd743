//! Database operations for the `users` table.
//!
//! There is exactly one recognized identity: the admin whose credentials
//! arrive via configuration and are upserted at startup.

use sqlx::PgPool;

use crate::DbError;

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Upserts the admin identity from configuration.
///
/// Conflicts on `username` replace the stored hash, so rotating the
/// configured password takes effect on the next startup.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_admin_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, password_hash) \
         VALUES ($1, $2) \
         ON CONFLICT (username) DO UPDATE SET \
             password_hash = EXCLUDED.password_hash \
         RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Looks up a user by username.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
