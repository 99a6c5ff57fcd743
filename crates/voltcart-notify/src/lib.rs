//! Admin notification for newly created orders: a messaging-gateway client
//! plus the composer that renders the order summary.
//!
//! Notification is best-effort by contract: callers dispatch it detached
//! from the order response and log failures instead of surfacing them.

mod client;
mod compose;
mod error;

pub use client::GatewayClient;
pub use compose::{compose_order_message, send_order_notification};
pub use error::NotifyError;
