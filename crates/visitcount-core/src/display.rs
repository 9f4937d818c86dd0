//! Page-side contract for rendering the counter.
//!
//! The page issues `GET /visits` on load and writes either the returned count
//! or [`ERROR_TEXT`] into its display element.

use crate::error::ClientDisplayError;
use crate::record::VisitsBody;

/// Text shown instead of a count when the fetch fails.
pub const ERROR_TEXT: &str = "ERROR";

/// What the page got back from its fetch.
#[derive(Debug, Clone, Copy)]
pub enum FetchOutcome<'a> {
    /// Transport failed before any status was received.
    Network(&'a str),
    /// A response arrived (any status).
    Response { status: u16, body: &'a [u8] },
}

/// Extract the visit count, treating any non-2xx status as a failure.
pub fn parse_reply(outcome: FetchOutcome<'_>) -> Result<u64, ClientDisplayError> {
    match outcome {
        FetchOutcome::Network(e) => Err(ClientDisplayError::Network(e.to_string())),
        FetchOutcome::Response { status, .. } if !(200..300).contains(&status) => {
            Err(ClientDisplayError::Status(status))
        }
        FetchOutcome::Response { body, .. } => serde_json::from_slice::<VisitsBody>(body)
            .map(|b| b.visits)
            .map_err(|e| ClientDisplayError::Body(e.to_string())),
    }
}

/// Text for the display element. Errors are logged and rendered as [`ERROR_TEXT`].
pub fn display_text(outcome: FetchOutcome<'_>) -> String {
    match parse_reply(outcome) {
        Ok(visits) => visits.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Error fetching visitor count");
            ERROR_TEXT.to_string()
        }
    }
}
