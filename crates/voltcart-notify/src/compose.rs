//! Renders and sends the admin summary for a newly created order.

use sqlx::PgPool;

use crate::{GatewayClient, NotifyError};

const CONSULTATION_LINE: &str = "Consultation: callback requested";

/// Composes the order summary and forwards it to the gateway.
///
/// Everything is re-read from the store rather than reused from request
/// state, so a failed notification can be retried later for the same id.
///
/// # Errors
///
/// Returns [`NotifyError`] if the order cannot be read back or the gateway
/// call fails. Callers run this detached from the order response and log
/// the error; it never reaches the customer.
pub async fn send_order_notification(
    pool: &PgPool,
    client: &GatewayClient,
    order_id: i64,
) -> Result<(), NotifyError> {
    let message = compose_order_message(pool, order_id).await?;
    client.send_text(&message).await
}

/// Builds the fixed-template order summary text.
///
/// Line items referencing a missing or absent product render as the
/// consultation line instead of failing the whole notification. The total
/// sums `retail_price × quantity` over resolvable items only; a product
/// without a retail price contributes nothing.
///
/// # Errors
///
/// Returns [`NotifyError::OrderNotFound`] if the order does not exist, or
/// [`NotifyError::Db`] if a read fails.
pub async fn compose_order_message(pool: &PgPool, order_id: i64) -> Result<String, NotifyError> {
    let order = voltcart_db::get_order(pool, order_id)
        .await?
        .ok_or(NotifyError::OrderNotFound(order_id))?;
    let items = voltcart_db::list_order_items(pool, order_id).await?;

    let mut total = 0.0_f64;
    let mut lines = Vec::with_capacity(items.len());
    for item in &items {
        let product = match item.product_id {
            Some(id) => voltcart_db::get_product(pool, id).await?,
            None => None,
        };
        match product {
            Some(product) => {
                total += product.retail_price.unwrap_or(0.0) * f64::from(item.quantity);
                lines.push(format!("{} (quantity: {})", product.model, item.quantity));
            }
            None => lines.push(CONSULTATION_LINE.to_string()),
        }
    }

    let item_details = if lines.is_empty() {
        "none".to_string()
    } else {
        lines.join("\n    - ")
    };

    Ok(format!(
        "*New order: #{}* \u{1F389}\n\
         *Name*: {}\n\
         *Phone*: {}\n\
         *Address*: {}\n\
         *Items*:\n    - {}\n\n\
         *Total*: {}",
        order.id, order.customer_name, order.customer_phone, order.address, item_details, total
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltcart_core::NewProduct;
    use voltcart_db::orders::{NewOrder, NewOrderItem};

    fn battery(model: &str, retail: Option<f64>) -> NewProduct {
        NewProduct {
            model: model.to_string(),
            capacity_ah: Some(60.0),
            cold_cranking_amps_en: None,
            length_mm: None,
            width_mm: None,
            height_mm: None,
            weight_kg: None,
            wholesale_price: None,
            retail_price: retail,
            category_id: None,
            photo: None,
        }
    }

    async fn seed_order(pool: &PgPool, items: &[NewOrderItem]) -> i64 {
        let order = NewOrder {
            customer_name: "Ivan",
            customer_phone: "+7700100200",
            address: "12 Main St",
        };
        voltcart_db::create_order_with_items(pool, &order, items)
            .await
            .expect("seed order")
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn message_lists_items_and_total(pool: PgPool) {
        let product_id = voltcart_db::insert_product(&pool, &battery("VX-60", Some(72.0)))
            .await
            .expect("seed product");
        let order_id = seed_order(
            &pool,
            &[NewOrderItem {
                product_id: Some(product_id),
                quantity: 2,
            }],
        )
        .await;

        let message = compose_order_message(&pool, order_id)
            .await
            .expect("compose");

        assert!(message.contains(&format!("*New order: #{order_id}*")));
        assert!(message.contains("*Name*: Ivan"));
        assert!(message.contains("VX-60 (quantity: 2)"));
        assert!(message.contains("*Total*: 144"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn consultation_item_renders_fixed_line(pool: PgPool) {
        let order_id = seed_order(
            &pool,
            &[NewOrderItem {
                product_id: None,
                quantity: 1,
            }],
        )
        .await;

        let message = compose_order_message(&pool, order_id)
            .await
            .expect("compose");

        assert!(message.contains(CONSULTATION_LINE));
        assert!(message.contains("*Total*: 0"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn priceless_product_contributes_nothing_to_total(pool: PgPool) {
        let priced = voltcart_db::insert_product(&pool, &battery("VX-60", Some(72.0)))
            .await
            .expect("seed product");
        let unpriced = voltcart_db::insert_product(&pool, &battery("VX-NP", None))
            .await
            .expect("seed product");
        let order_id = seed_order(
            &pool,
            &[
                NewOrderItem {
                    product_id: Some(priced),
                    quantity: 1,
                },
                NewOrderItem {
                    product_id: Some(unpriced),
                    quantity: 3,
                },
            ],
        )
        .await;

        let message = compose_order_message(&pool, order_id)
            .await
            .expect("compose");

        assert!(message.contains("VX-NP (quantity: 3)"));
        assert!(message.contains("*Total*: 72"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn missing_order_is_an_error(pool: PgPool) {
        let result = compose_order_message(&pool, 4242).await;
        assert!(matches!(result, Err(NotifyError::OrderNotFound(4242))));
    }
}
