//! visitcount gateway binary.
//!
//! - Config: `VISITCOUNT_CONFIG` (default `visitcount.yaml`), `TABLE_NAME` overrides `store.table`
//! - Endpoint: `GET /visits`
//! - Graceful shutdown on Ctrl-C

use tracing_subscriber::{fmt, EnvFilter};

use visitcount_core::error::{CounterError, Result};
use visitcount_gateway::{app_state::AppState, config, router};

const CONFIG_ENV: &str = "VISITCOUNT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "visitcount.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_env(&path).inspect_err(|e| {
        tracing::error!(%path, error = %e, "config load failed");
    })?;
    let listen = cfg.gateway.listen_addr()?;

    let state = AppState::new(cfg).await?;
    let app = router::build_router(state);

    tracing::info!(%listen, "visitcount-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| CounterError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CounterError::Internal(format!("server failed: {e}")))?;

    tracing::info!("visitcount-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
