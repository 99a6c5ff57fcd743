use thiserror::Error;

/// Errors returned by the gateway client and the notification composer.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network or TLS failure, or a non-2xx gateway response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The order or its items could not be read back from the store.
    #[error(transparent)]
    Db(#[from] voltcart_db::DbError),

    /// The order id does not resolve to an order row.
    #[error("order {0} not found")]
    OrderNotFound(i64),
}
