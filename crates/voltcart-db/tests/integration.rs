//! Offline tests for voltcart-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use voltcart_core::{AppConfig, Environment};
use voltcart_db::{OrderItemRow, PoolConfig, ProductRow};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3001),
        log_level: "info".to_string(),
        admin_username: "admin".to_string(),
        admin_password_hash: "$argon2id$stub".to_string(),
        token_signing_secret: "secret".to_string(),
        token_ttl_secs: 1800,
        gateway: None,
        notify_timeout_secs: 10,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`ProductRow`] serializes with the
/// wire field names the storefront expects. No database required.
#[test]
fn product_row_serializes_with_expected_fields() {
    let row = ProductRow {
        id: 42,
        model: "VX-60".to_string(),
        capacity_ah: Some(60.0),
        cold_cranking_amps_en: Some("540".to_string()),
        length_mm: Some(242.0),
        width_mm: Some(175.0),
        height_mm: Some(190.0),
        weight_kg: Some(14.2),
        wholesale_price: Some(55.5),
        retail_price: Some(72.0),
        category_id: Some(1),
        photo: Some("/uploads/vx-60.jpg".to_string()),
        views: 3,
    };

    let json = serde_json::to_value(&row).expect("serialize ProductRow");
    assert_eq!(json["model"], "VX-60");
    assert_eq!(json["capacity_ah"], 60.0);
    assert_eq!(json["views"], 3);
    assert_eq!(json["category_id"], 1);
}

#[test]
fn order_item_row_null_product_marks_consultation() {
    let row = OrderItemRow {
        id: 1,
        order_id: 9,
        product_id: None,
        quantity: 1,
    };

    let json = serde_json::to_value(&row).expect("serialize OrderItemRow");
    assert!(json["product_id"].is_null());
    assert_eq!(json["quantity"], 1);
}
