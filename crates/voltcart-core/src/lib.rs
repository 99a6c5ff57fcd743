pub mod app_config;
mod config;
pub mod filters;
pub mod import;

pub use app_config::{AppConfig, Environment, GatewayConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use import::{parse_products_csv, NewProduct};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
