use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials for the outbound messaging gateway.
///
/// All four values travel together: the gateway is either fully configured
/// or absent, in which case order notifications are disabled.
#[derive(Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub instance_id: String,
    pub api_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("instance_id", &self.instance_id)
            .field("api_token", &"[redacted]")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub admin_username: String,
    /// Argon2 PHC string for the admin password. Produced out of band;
    /// never a plaintext secret.
    pub admin_password_hash: String,
    pub token_signing_secret: String,
    pub token_ttl_secs: u64,
    pub gateway: Option<GatewayConfig>,
    pub notify_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("admin_username", &self.admin_username)
            .field("admin_password_hash", &"[redacted]")
            .field("token_signing_secret", &"[redacted]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("gateway", &self.gateway)
            .field("notify_timeout_secs", &self.notify_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
