use std::net::SocketAddr;

use serde::Deserialize;
use visitcount_core::error::{CounterError, Result};
use visitcount_core::DEFAULT_COUNTER_ID;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    pub store: StoreConfig,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CounterError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Value of `Access-Control-Allow-Origin` on every `/visits` response.
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            allow_origin: default_allow_origin(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.allow_origin.trim().is_empty() {
            return Err(CounterError::BadConfig(
                "gateway.allow_origin must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            CounterError::BadConfig(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_allow_origin() -> String {
    "*".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Name of the backing table. Required.
    #[serde(default)]
    pub table: String,

    #[serde(default = "default_counter_id")]
    pub counter_id: String,

    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl StoreConfig {
    /// Minimal valid config for `table`, everything else defaulted.
    pub fn for_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            counter_id: default_counter_id(),
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_table_name(&self.table)?;
        if self.counter_id.is_empty() {
            return Err(CounterError::BadConfig("store.counter_id must not be empty".into()));
        }
        if self.backend == StoreBackend::File && self.data_dir.is_empty() {
            return Err(CounterError::BadConfig(
                "store.data_dir is required for the file backend".into(),
            ));
        }
        Ok(())
    }
}

/// Table names follow the usual managed-store rule: 3..=255 of `[A-Za-z0-9_.-]`.
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CounterError::BadConfig("store.table is required".into()));
    }
    if !(3..=255).contains(&name.len()) {
        return Err(CounterError::BadConfig(
            "store.table must be between 3 and 255 characters".into(),
        ));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(CounterError::BadConfig(format!(
            "store.table contains invalid character {c:?}"
        )));
    }
    Ok(())
}

fn default_counter_id() -> String {
    DEFAULT_COUNTER_ID.into()
}
fn default_data_dir() -> String {
    "./data".into()
}
