//! Order placement and admin order reads.
//!
//! Placement walks Received → Validated → Persisted → NotificationAttempted
//! → Complete. Persistence is the order row plus a concurrent line-item
//! batch; the admin notification runs on a detached task so the response
//! never waits on the messaging gateway.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use voltcart_db::orders::{NewOrder, NewOrderItem, OrderItemRow, OrderRow};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
struct CreateOrderRequest {
    customer_name: String,
    customer_phone: String,
    address: String,
    #[serde(default)]
    items: Vec<OrderItemInput>,
}

#[derive(Debug, Deserialize)]
struct OrderItemInput {
    product_id: Option<i64>,
    quantity: i32,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateOrderResponse {
    message: &'static str,
    #[serde(rename = "orderId")]
    order_id: i64,
}

pub(super) async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let body: CreateOrderRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::validation(format!("invalid order request: {e}")))?;

    for (field, value) in [
        ("customer_name", &body.customer_name),
        ("customer_phone", &body.customer_phone),
        ("address", &body.address),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::validation(format!("{field} is required")));
        }
    }

    // An empty cart still becomes a well-formed order: one consultation
    // line standing in for a callback request.
    let items: Vec<NewOrderItem> = if body.items.is_empty() {
        vec![NewOrderItem {
            product_id: None,
            quantity: 1,
        }]
    } else {
        body.items
            .iter()
            .map(|item| NewOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect()
    };

    let order = NewOrder {
        customer_name: &body.customer_name,
        customer_phone: &body.customer_phone,
        address: &body.address,
    };
    let order_id = voltcart_db::create_order_with_items(&state.pool, &order, &items)
        .await
        .map_err(|e| ApiError::store(&e))?;

    dispatch_notification(&state, order_id);

    Ok(Json(CreateOrderResponse {
        message: "Order created",
        order_id,
    }))
}

/// Fire the admin notification on a detached task. The order is already
/// persisted; a slow or failing gateway must not affect the response.
fn dispatch_notification(state: &AppState, order_id: i64) {
    let Some(gateway) = &state.gateway else {
        tracing::debug!(order_id, "messaging gateway not configured; skipping notification");
        return;
    };

    let pool = state.pool.clone();
    let gateway = Arc::clone(gateway);
    tokio::spawn(async move {
        if let Err(error) = voltcart_notify::send_order_notification(&pool, &gateway, order_id).await
        {
            tracing::warn!(order_id, error = %error, "admin notification failed");
        } else {
            tracing::info!(order_id, "admin notification sent");
        }
    });
}

#[derive(Debug, Serialize)]
pub(super) struct OrdersResponse {
    orders: Vec<OrderRow>,
}

pub(super) async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<OrdersResponse>, ApiError> {
    let orders = voltcart_db::list_orders(&state.pool)
        .await
        .map_err(|e| ApiError::store(&e))?;

    Ok(Json(OrdersResponse { orders }))
}

#[derive(Debug, Serialize)]
pub(super) struct OrderDetailResponse {
    order: Option<OrderRow>,
    items: Vec<OrderItemRow>,
}

pub(super) async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let order = voltcart_db::get_order(&state.pool, id)
        .await
        .map_err(|e| ApiError::store(&e))?;
    let items = voltcart_db::list_order_items(&state.pool, id)
        .await
        .map_err(|e| ApiError::store(&e))?;

    Ok(Json(OrderDetailResponse { order, items }))
}
