use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use visitcount_core::error::{CounterError, Result};
use visitcount_core::CounterRecord;

use super::CounterStore;

type Rows = DashMap<String, u64>;

/// In-process tables: table name -> (id -> visits).
///
/// Per-key atomicity comes from the shard write lock held by `entry`.
#[derive(Default)]
pub struct MemoryTable {
    tables: DashMap<String, Arc<Rows>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self { tables: DashMap::new() }
    }

    /// Create `table` if it does not exist yet.
    pub fn create_table(&self, table: &str) {
        self.tables.entry(table.to_string()).or_default();
    }

    /// Overwrite a row. Fixture helper; the gateway itself never calls this.
    pub fn put(&self, table: &str, record: CounterRecord) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(record.id, record.visits);
    }

    fn rows(&self, table: &str) -> Result<Arc<Rows>> {
        self.tables
            .get(table)
            .map(|r| Arc::clone(r.value()))
            .ok_or_else(|| CounterError::StoreUnavailable(format!("table not found: {table}")))
    }
}

#[async_trait]
impl CounterStore for MemoryTable {
    async fn increment(&self, table: &str, id: &str, delta: u64) -> Result<CounterRecord> {
        let rows = self.rows(table)?;
        let mut visits = rows.entry(id.to_string()).or_insert(0);
        let next = visits.checked_add(delta).ok_or_else(|| {
            CounterError::StoreUnavailable(format!("visits overflow for {table}/{id}"))
        })?;
        *visits = next;
        Ok(CounterRecord::new(id, next))
    }

    async fn get(&self, table: &str, id: &str) -> Result<Option<CounterRecord>> {
        let rows = self.rows(table)?;
        let record = rows.get(id).map(|v| CounterRecord::new(id, *v));
        Ok(record)
    }
}
