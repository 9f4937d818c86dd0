#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;

use visitcount_core::error::CounterError;
use visitcount_core::CounterRecord;
use visitcount_gateway::config::StoreConfig;
use visitcount_gateway::{CounterClient, CounterStore, FileTable, MemoryTable};

const TABLE: &str = "visits";
const ID: &str = "visitor-count";

fn memory_client(seed: Option<u64>) -> (Arc<MemoryTable>, CounterClient) {
    let store = Arc::new(MemoryTable::new());
    store.create_table(TABLE);
    if let Some(v) = seed {
        store.put(TABLE, CounterRecord::new(ID, v));
    }
    let client = CounterClient::new(&StoreConfig::for_table(TABLE), store.clone()).unwrap();
    (store, client)
}

async fn run_concurrently(client: &CounterClient, n: u64) -> Vec<u64> {
    let handles = (0..n).map(|_| {
        let c = client.clone();
        tokio::spawn(async move { c.increment_and_get(ID).await })
    });
    let mut got: Vec<u64> = join_all(handles)
        .await
        .into_iter()
        .map(|h| h.unwrap().unwrap())
        .collect();
    got.sort_unstable();
    got
}

#[tokio::test]
async fn first_increment_creates_record() {
    let (store, client) = memory_client(None);
    assert_eq!(client.current(ID).await.unwrap(), None);

    assert_eq!(client.increment_and_get(ID).await.unwrap(), 1);
    assert_eq!(store.get(TABLE, ID).await.unwrap(), Some(CounterRecord::new(ID, 1)));
}

#[tokio::test]
async fn increments_from_seeded_value() {
    let (_store, client) = memory_client(Some(41));
    assert_eq!(client.increment_default().await.unwrap(), 42);
    assert_eq!(client.current(ID).await.unwrap(), Some(42));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increments_lose_nothing_in_memory() {
    let (_store, client) = memory_client(Some(100));
    let got = run_concurrently(&client, 200).await;

    assert_eq!(got, (101..=300).collect::<Vec<_>>());
    assert_eq!(client.current(ID).await.unwrap(), Some(300));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increments_lose_nothing_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileTable::open(dir.path()).await.unwrap());
    store.create_table(TABLE).await.unwrap();
    let client = CounterClient::new(&StoreConfig::for_table(TABLE), store).unwrap();

    let got = run_concurrently(&client, 50).await;
    assert_eq!(got, (1..=50).collect::<Vec<_>>());

    // A fresh handle reads the persisted value back.
    let reopened = FileTable::open(dir.path()).await.unwrap();
    assert_eq!(
        reopened.get(TABLE, ID).await.unwrap(),
        Some(CounterRecord::new(ID, 50))
    );
}

#[tokio::test]
async fn file_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTable::open(dir.path()).await.unwrap();
    store.create_table(TABLE).await.unwrap();
    store.increment(TABLE, ID, 1).await.unwrap();

    let raw = std::fs::read(store.path(TABLE)).unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(rows, serde_json::json!([{ "id": ID, "visits": 1 }]));
}

#[tokio::test]
async fn failed_write_leaves_value_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTable::open(dir.path()).await.unwrap();
    store.create_table(TABLE).await.unwrap();
    assert_eq!(store.increment(TABLE, ID, 1).await.unwrap().visits, 1);

    // A directory squatting on the temp path makes the write fail.
    let tmp = dir.path().join(format!("{TABLE}.json.tmp"));
    std::fs::create_dir(&tmp).unwrap();

    let err = store.increment(TABLE, ID, 1).await.unwrap_err();
    assert!(matches!(err, CounterError::StoreUnavailable(_)), "{err}");
    assert_eq!(store.get(TABLE, ID).await.unwrap().unwrap().visits, 1);

    std::fs::remove_dir(&tmp).unwrap();
    assert_eq!(store.increment(TABLE, ID, 1).await.unwrap().visits, 2);
}

#[tokio::test]
async fn unknown_table_is_store_unavailable() {
    let store = Arc::new(MemoryTable::new());
    let client = CounterClient::new(&StoreConfig::for_table("missing"), store).unwrap();
    let err = client.increment_and_get(ID).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");

    let dir = tempfile::tempdir().unwrap();
    let files = FileTable::open(dir.path()).await.unwrap();
    assert!(matches!(
        files.increment("missing", ID, 1).await,
        Err(CounterError::StoreUnavailable(_))
    ));
}

#[tokio::test]
async fn overflow_is_refused() {
    let (store, client) = memory_client(Some(u64::MAX));
    assert!(client.increment_and_get(ID).await.is_err());
    assert_eq!(store.get(TABLE, ID).await.unwrap().unwrap().visits, u64::MAX);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn file_failures_never_increment_and_successes_always_do() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileTable::open(dir.path()).await.unwrap());
    store.create_table(TABLE).await.unwrap();
    store.increment(TABLE, ID, 1).await.unwrap();
    let client = CounterClient::new(&StoreConfig::for_table(TABLE), store.clone()).unwrap();

    let fan_out = |n: usize| {
        let handles: Vec<_> = (0..n)
            .map(|_| {
                let c = client.clone();
                tokio::spawn(async move { c.increment_and_get(ID).await })
            })
            .collect();
        async move {
            join_all(handles)
                .await
                .into_iter()
                .map(|h| h.unwrap())
                .collect::<Vec<_>>()
        }
    };

    // Every write fails: all 300 calls report an error and none of them lands.
    let tmp = dir.path().join(format!("{TABLE}.json.tmp"));
    std::fs::create_dir(&tmp).unwrap();
    let results = fan_out(300).await;
    assert!(results.iter().all(|r| matches!(r, Err(CounterError::StoreUnavailable(_)))));
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(store.get(TABLE, ID).await.unwrap().unwrap().visits, 1);

    // Writes work again: the stored value grows by exactly the number of successes.
    std::fs::remove_dir(&tmp).unwrap();
    let results = fan_out(300).await;
    let ok = results.iter().filter(|r| r.is_ok()).count() as u64;
    assert_eq!(ok, 300);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(store.get(TABLE, ID).await.unwrap().unwrap().visits, 1 + ok);
}

#[tokio::test]
async fn leftover_torn_temp_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTable::open(dir.path()).await.unwrap();
    store.create_table(TABLE).await.unwrap();

    // Half-written image left behind by a crash before the rename.
    std::fs::write(dir.path().join(format!("{TABLE}.json.tmp")), b"[{\"id\": \"visi").unwrap();

    assert_eq!(store.increment(TABLE, ID, 1).await.unwrap().visits, 1);
    let raw = std::fs::read(store.path(TABLE)).unwrap();
    let rows: Vec<CounterRecord> = serde_json::from_slice(&raw).unwrap();
    assert_eq!(rows, vec![CounterRecord::new(ID, 1)]);
    assert!(!dir.path().join(format!("{TABLE}.json.tmp")).exists());
}

#[test]
fn client_rejects_invalid_config() {
    let store = Arc::new(MemoryTable::new());
    assert!(CounterClient::new(&StoreConfig::for_table(""), store).is_err());
}
