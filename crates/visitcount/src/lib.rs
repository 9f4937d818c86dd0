//! Top-level facade crate for visitcount.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use visitcount_core::*;
}

pub mod gateway {
    pub use visitcount_gateway::*;
}

/// The handful of types needed to embed the counter.
pub mod prelude {
    pub use visitcount_core::{CounterError, CounterRecord, Result, VisitsBody};
    pub use visitcount_gateway::config::{GatewayConfig, StoreConfig};
    pub use visitcount_gateway::router::build_router;
    pub use visitcount_gateway::{AppState, CounterClient, CounterStore, FileTable, MemoryTable};
}
