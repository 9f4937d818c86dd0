//! Transport layer (HTTP).
//!
//! Exposes the `/visits` handler and its error-to-response mapping.

pub mod visits;
