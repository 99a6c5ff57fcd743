mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = voltcart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = voltcart_db::PoolConfig::from_app_config(&config);
    let pool = voltcart_db::connect_pool(&config.database_url, pool_config).await?;
    voltcart_db::run_migrations(&pool).await?;
    voltcart_db::upsert_admin_user(&pool, &config.admin_username, &config.admin_password_hash)
        .await?;

    let gateway = match &config.gateway {
        Some(gateway_config) => Some(Arc::new(voltcart_notify::GatewayClient::new(
            gateway_config,
            config.notify_timeout_secs,
        )?)),
        None => {
            tracing::warn!("messaging gateway not configured; order notifications disabled");
            None
        }
    };

    let auth = AuthState::new(&config.token_signing_secret, config.token_ttl_secs);
    let app = build_app(AppState {
        pool,
        auth,
        gateway,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "voltcart server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
