//! Durable JSON-file tables.
//!
//! Layout: `<dir>/<table>.json` holds `[{"id": "...", "visits": n}, ...]`.
//! A new image is written to `<table>.json.tmp` and renamed over the old file,
//! so readers only ever see a complete table.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use visitcount_core::error::{CounterError, Result};
use visitcount_core::CounterRecord;

use super::CounterStore;

type Rows = BTreeMap<String, u64>;
type Cache = HashMap<String, Rows>;

pub struct FileTable {
    dir: Arc<PathBuf>,
    // Serializes every read-modify-write. The image of a table is only
    // replaced after its file has been renamed into place.
    cache: Arc<Mutex<Cache>>,
}

impl FileTable {
    /// Open (and create if needed) the data directory.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| unavailable(&dir, "create data dir", e))?;
        Ok(Self {
            dir: Arc::new(dir),
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Create an empty table file unless one already exists.
    pub async fn create_table(&self, table: &str) -> Result<()> {
        let _guard = self.cache.lock().await;
        let path = table_path(&self.dir, table);
        match tokio::fs::metadata(&path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "creating counter table");
                persist(&self.dir, table, &Rows::new()).await
            }
            Err(e) => Err(unavailable(&path, "stat", e)),
        }
    }

    pub fn path(&self, table: &str) -> PathBuf {
        table_path(&self.dir, table)
    }
}

#[async_trait]
impl CounterStore for FileTable {
    async fn increment(&self, table: &str, id: &str, delta: u64) -> Result<CounterRecord> {
        // Runs detached so a dropped request cannot release the lock between
        // the rename and the cache update.
        let dir = Arc::clone(&self.dir);
        let cache = Arc::clone(&self.cache);
        let (table, id) = (table.to_string(), id.to_string());
        let task = tokio::spawn(async move {
            let mut cache = cache.lock_owned().await;
            increment_locked(&dir, &mut cache, &table, &id, delta).await
        });
        task.await
            .map_err(|e| CounterError::Internal(format!("file table task failed: {e}")))?
    }

    async fn get(&self, table: &str, id: &str) -> Result<Option<CounterRecord>> {
        let mut cache = self.cache.lock().await;
        let rows = cached_rows(&self.dir, &mut cache, table).await?;
        Ok(rows.get(id).map(|visits| CounterRecord::new(id, *visits)))
    }
}

async fn increment_locked(
    dir: &Path,
    cache: &mut Cache,
    table: &str,
    id: &str,
    delta: u64,
) -> Result<CounterRecord> {
    let rows = cached_rows(dir, cache, table).await?;
    let current = rows.get(id).copied().unwrap_or(0);
    let next = current.checked_add(delta).ok_or_else(|| {
        CounterError::StoreUnavailable(format!("visits overflow for {table}/{id}"))
    })?;

    let mut staged = rows.clone();
    staged.insert(id.to_string(), next);
    persist(dir, table, &staged).await?;
    cache.insert(table.to_string(), staged);
    Ok(CounterRecord::new(id, next))
}

async fn cached_rows<'a>(dir: &Path, cache: &'a mut Cache, table: &str) -> Result<&'a Rows> {
    if !cache.contains_key(table) {
        let rows = load(dir, table).await?;
        cache.insert(table.to_string(), rows);
    }
    cache
        .get(table)
        .ok_or_else(|| CounterError::Internal(format!("table {table} missing from cache")))
}

async fn load(dir: &Path, table: &str) -> Result<Rows> {
    let path = table_path(dir, table);
    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CounterError::StoreUnavailable(format!("table not found: {table}")));
        }
        Err(e) => return Err(unavailable(&path, "read", e)),
    };
    let records: Vec<CounterRecord> = serde_json::from_slice(&bytes).map_err(|e| {
        CounterError::StoreUnavailable(format!("corrupt table {}: {e}", path.display()))
    })?;
    Ok(records.into_iter().map(|r| (r.id, r.visits)).collect())
}

async fn persist(dir: &Path, table: &str, rows: &Rows) -> Result<()> {
    let records: Vec<CounterRecord> = rows
        .iter()
        .map(|(id, visits)| CounterRecord::new(id.clone(), *visits))
        .collect();
    let json = serde_json::to_vec_pretty(&records)
        .map_err(|e| CounterError::Internal(format!("encode table {table}: {e}")))?;

    let tmp = dir.join(format!("{table}.json.tmp"));
    let path = table_path(dir, table);
    write_synced(&tmp, &json)
        .await
        .map_err(|e| unavailable(&tmp, "write", e))?;
    tokio::fs::rename(&tmp, &path)
        .await
        .map_err(|e| unavailable(&path, "rename", e))
}

/// Write and fsync, so the rename never publishes a torn file after a crash.
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

fn table_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{table}.json"))
}

fn unavailable(path: &Path, op: &str, e: std::io::Error) -> CounterError {
    CounterError::StoreUnavailable(format!("{op} {}: {e}", path.display()))
}
