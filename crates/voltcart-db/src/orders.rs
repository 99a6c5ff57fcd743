//! Database operations for `orders` and `order_items`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// A row from the `order_items` table.
///
/// `product_id` NULL marks a consultation line (callback request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OrderItemRow {
    pub id: i64,
    pub order_id: i64,
    pub product_id: Option<i64>,
    pub quantity: i32,
}

/// Customer fields of an order about to be created.
#[derive(Debug, Clone, Copy)]
pub struct NewOrder<'a> {
    pub customer_name: &'a str,
    pub customer_phone: &'a str,
    pub address: &'a str,
}

/// One line item of an order about to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: Option<i64>,
    pub quantity: i32,
}

/// Inserts the order row, then fans out all line-item inserts concurrently
/// and awaits them jointly.
///
/// There is no enclosing transaction: if a line-item insert fails, the
/// order row (and any items that made it in) stay behind and the error is
/// returned. Callers surface the failure; the partially written order is
/// the accepted trade-off of the non-transactional batch.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the order insert or any item insert fails.
pub async fn create_order_with_items(
    pool: &PgPool,
    order: &NewOrder<'_>,
    items: &[NewOrderItem],
) -> Result<i64, DbError> {
    let order_id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (customer_name, customer_phone, address) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(order.customer_name)
    .bind(order.customer_phone)
    .bind(order.address)
    .fetch_one(pool)
    .await?;

    let inserts = items
        .iter()
        .map(|item| insert_order_item(pool, order_id, *item));
    futures::future::try_join_all(inserts).await?;

    Ok(order_id)
}

/// Inserts one line item and returns its id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_order_item(
    pool: &PgPool,
    order_id: i64,
    item: NewOrderItem,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO order_items (order_id, product_id, quantity) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(order_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns all orders, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_orders(pool: &PgPool) -> Result<Vec<OrderRow>, DbError> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT id, customer_name, customer_phone, address, created_at \
         FROM orders \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetches a single order by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_order(pool: &PgPool, id: i64) -> Result<Option<OrderRow>, DbError> {
    let row = sqlx::query_as::<_, OrderRow>(
        "SELECT id, customer_name, customer_phone, address, created_at \
         FROM orders \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns an order's line items, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_order_items(pool: &PgPool, order_id: i64) -> Result<Vec<OrderItemRow>, DbError> {
    let rows = sqlx::query_as::<_, OrderItemRow>(
        "SELECT id, order_id, product_id, quantity \
         FROM order_items \
         WHERE order_id = $1 \
         ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
