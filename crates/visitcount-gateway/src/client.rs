//! Counter Store Client: the single increment-and-get operation.

use std::sync::Arc;

use visitcount_core::error::Result;

use crate::config::StoreConfig;
use crate::store::CounterStore;

/// Bound to one table at construction. Holds no counter state of its own.
#[derive(Clone)]
pub struct CounterClient {
    store: Arc<dyn CounterStore>,
    table: String,
    counter_id: String,
}

impl CounterClient {
    /// Validates `cfg` once; an unusable config never reaches the request path.
    pub fn new(cfg: &StoreConfig, store: Arc<dyn CounterStore>) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            store,
            table: cfg.table.clone(),
            counter_id: cfg.counter_id.clone(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn counter_id(&self) -> &str {
        &self.counter_id
    }

    /// Atomically add one visit to `id` and return the new total.
    ///
    /// An absent record counts as zero, so the first call returns 1. The store's
    /// answer is the only outcome: no timer is raced against it, so an error
    /// always means the record was left untouched. Nothing is retried here.
    pub async fn increment_and_get(&self, id: &str) -> Result<u64> {
        let record = self.store.increment(&self.table, id, 1).await?;
        Ok(record.visits)
    }

    /// [`Self::increment_and_get`] on the configured counter id.
    pub async fn increment_default(&self) -> Result<u64> {
        self.increment_and_get(&self.counter_id).await
    }

    /// Current total of `id`, `None` when never incremented.
    pub async fn current(&self, id: &str) -> Result<Option<u64>> {
        let record = self.store.get(&self.table, id).await?;
        Ok(record.map(|r| r.visits))
    }
}
