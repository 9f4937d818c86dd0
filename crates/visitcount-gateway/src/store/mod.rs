//! Key-value backends for the counter table.
//!
//! Every backend exposes the same atomic primitive,
//! `SET visits = if_not_exists(visits, 0) + delta` returning the updated row.
//! Callers never read and then write.

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use visitcount_core::error::Result;
use visitcount_core::CounterRecord;

use crate::config::{StoreBackend, StoreConfig};

pub use file::FileTable;
pub use memory::MemoryTable;

#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically add `delta` to `visits` of `(table, id)`, creating the row at 0
    /// first when absent. Conflicting updates to one key are serialized.
    async fn increment(&self, table: &str, id: &str, delta: u64) -> Result<CounterRecord>;

    /// Point read. Not part of the increment path.
    async fn get(&self, table: &str, id: &str) -> Result<Option<CounterRecord>>;
}

/// Build the configured backend and make sure its table exists.
pub async fn open_backend(cfg: &StoreConfig) -> Result<Arc<dyn CounterStore>> {
    match cfg.backend {
        StoreBackend::Memory => {
            let store = MemoryTable::new();
            store.create_table(&cfg.table);
            tracing::info!(table = %cfg.table, "using in-memory counter table");
            Ok(Arc::new(store))
        }
        StoreBackend::File => {
            let store = FileTable::open(&cfg.data_dir).await?;
            store.create_table(&cfg.table).await?;
            tracing::info!(table = %cfg.table, dir = %cfg.data_dir, "using file counter table");
            Ok(Arc::new(store))
        }
    }
}
