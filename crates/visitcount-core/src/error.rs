//! Shared error types across visitcount crates.

use thiserror::Error;

/// Operator-facing error codes (stable API, used in logs and metrics labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// The backing store could not complete the increment.
    StoreUnavailable,
    /// Configuration missing or invalid.
    BadConfig,
    /// Anything else.
    Internal,
}

impl ClientCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CounterError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum CounterError {
    /// Network, throttling, permission, timeout or malformed table: all collapse here.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CounterError {
    pub fn client_code(&self) -> ClientCode {
        match self {
            CounterError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            CounterError::BadConfig(_) => ClientCode::BadConfig,
            CounterError::Internal(_) => ClientCode::Internal,
        }
    }
}

/// Failure seen by the page when fetching the visit count.
///
/// Never propagated: the page renders [`crate::display::ERROR_TEXT`] instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientDisplayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("invalid body: {0}")]
    Body(String),
}
