//! visitcount gateway library entry.
//!
//! Wires config, the counter store backends, the Counter Store Client, and the
//! HTTP surface (`/visits` plus ops endpoints). Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod client;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod transport;

pub use app_state::AppState;
pub use client::CounterClient;
pub use store::{CounterStore, FileTable, MemoryTable};
