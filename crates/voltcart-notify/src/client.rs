//! HTTP client for the outbound messaging gateway.
//!
//! Wraps `reqwest` with the gateway's URL scheme and a fixed recipient.
//! The API token rides in the URL path per the gateway's contract.

use std::time::Duration;

use reqwest::Client;
use voltcart_core::GatewayConfig;

use crate::NotifyError;

/// Client for the messaging gateway.
///
/// Use [`GatewayClient::new`] for production or
/// [`GatewayClient::with_base_url`] to point at a mock server in tests.
pub struct GatewayClient {
    client: Client,
    base_url: String,
    instance_id: String,
    api_token: String,
    chat_id: String,
}

impl GatewayClient {
    /// Creates a client from the configured gateway credentials.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &GatewayConfig, timeout_secs: u64) -> Result<Self, NotifyError> {
        Self::with_base_url(
            &config.base_url,
            &config.instance_id,
            &config.api_token,
            &config.chat_id,
            timeout_secs,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        instance_id: &str,
        api_token: &str,
        chat_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            instance_id: instance_id.to_owned(),
            api_token: api_token.to_owned(),
            chat_id: chat_id.to_owned(),
        })
    }

    /// Sends a text message to the fixed recipient chat.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] on network failure or a non-2xx
    /// gateway response.
    pub async fn send_text(&self, message: &str) -> Result<(), NotifyError> {
        let url = self.send_message_url();
        let payload = serde_json::json!({
            "chatId": self.chat_id,
            "message": message,
        });

        let response = self.client.post(url).json(&payload).send().await?;
        response.error_for_status()?;
        Ok(())
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/waInstance{}/sendMessage/{}",
            self.base_url, self.instance_id, self.api_token
        )
    }
}
