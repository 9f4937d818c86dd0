//! Gateway config loader (strict parsing, fail fast).

pub mod schema;

use std::fs;

use visitcount_core::error::{CounterError, Result};

pub use schema::{GatewayConfig, GatewaySection, StoreBackend, StoreConfig};

/// Environment variable that overrides `store.table`.
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| CounterError::BadConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    load_with_table_override(s, None)
}

/// Parse, apply an optional table name override, then validate.
pub fn load_with_table_override(s: &str, table: Option<String>) -> Result<GatewayConfig> {
    let mut cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| CounterError::BadConfig(format!("invalid yaml: {e}")))?;
    if let Some(table) = table {
        cfg.store.table = table;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path`, letting `TABLE_NAME` override the table name when set.
pub fn load_from_env(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| CounterError::BadConfig(format!("read config failed ({path}): {e}")))?;
    let table = std::env::var(TABLE_NAME_ENV).ok().filter(|t| !t.is_empty());
    if let Some(t) = &table {
        tracing::info!(table = %t, "store.table overridden from {TABLE_NAME_ENV}");
    }
    load_with_table_override(&s, table)
}
