//! Persisted record and JSON bodies of the `/visits` endpoint.

use serde::{Deserialize, Serialize};

/// Identifier of the single global counter.
pub const DEFAULT_COUNTER_ID: &str = "visitor-count";

/// Body returned on any failure. Fixed text, no internal detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// One row of the counter table: `{ id (partition key), visits }`.
///
/// `visits` is only ever increased by the store's atomic update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    pub id: String,
    pub visits: u64,
}

impl CounterRecord {
    pub fn new(id: impl Into<String>, visits: u64) -> Self {
        Self { id: id.into(), visits }
    }
}

/// `200` body: `{"visits": <integer>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitsBody {
    pub visits: u64,
}

/// `500` body: `{"message": "Internal server error"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn internal() -> Self {
        Self { message: INTERNAL_ERROR_MESSAGE.to_string() }
    }
}
