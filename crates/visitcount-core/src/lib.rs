//! visitcount core: transport-agnostic record types, wire bodies, and errors.
//!
//! This crate defines the persisted Counter Record, the JSON bodies served by
//! the `/visits` endpoint, the page-side display contract, and the error
//! surface shared by the gateway. It carries no transport or runtime
//! dependencies.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `CounterError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod display;
pub mod error;
pub mod record;

pub use error::{ClientCode, ClientDisplayError, CounterError, Result};
pub use record::{CounterRecord, ErrorBody, VisitsBody, DEFAULT_COUNTER_ID};
