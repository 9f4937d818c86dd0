//! Shared application state for the visitcount gateway.
//!
//! Built once at startup; every fallible step returns `BadConfig` so `main`
//! can fail fast before binding the listener.

use std::sync::Arc;

use axum::http::HeaderValue;
use visitcount_core::error::{CounterError, Result};

use crate::client::CounterClient;
use crate::config::GatewayConfig;
use crate::obs::GatewayMetrics;
use crate::store::{self, CounterStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    client: CounterClient,
    allow_origin: HeaderValue,
    metrics: GatewayMetrics,
}

impl AppState {
    /// Open the configured backend and wire the client.
    pub async fn new(cfg: GatewayConfig) -> Result<Self> {
        let backend = store::open_backend(&cfg.store).await?;
        Self::with_store(cfg, backend)
    }

    /// Wire the client against an already opened store.
    pub fn with_store(cfg: GatewayConfig, store: Arc<dyn CounterStore>) -> Result<Self> {
        cfg.validate()?;
        let client = CounterClient::new(&cfg.store, store)?;
        let allow_origin = HeaderValue::from_str(&cfg.gateway.allow_origin).map_err(|e| {
            CounterError::BadConfig(format!("gateway.allow_origin is not a valid header value: {e}"))
        })?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                client,
                allow_origin,
                metrics: GatewayMetrics::default(),
            }),
        })
    }

    pub fn client(&self) -> &CounterClient {
        &self.inner.client
    }

    pub fn allow_origin(&self) -> HeaderValue {
        self.inner.allow_origin.clone()
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }
}
