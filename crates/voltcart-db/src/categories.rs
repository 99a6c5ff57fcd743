//! Database operations for the `categories` table.

use serde::Serialize;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

/// Returns all categories, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<CategoryRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Inserts a category and returns its id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_category(pool: &PgPool, name: &str) -> Result<i64, DbError> {
    let id: i64 =
        sqlx::query_scalar::<_, i64>("INSERT INTO categories (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await?;

    Ok(id)
}
