//! `/visits` handler: one increment per call, mapped to JSON.
//!
//! Two outcomes only. Success is `200 {"visits": n}`; any failure is
//! `500 {"message": "Internal server error"}` with the cause logged here and
//! never sent to the client. Both carry the configured CORS origin.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::time::Instant;

use visitcount_core::error::CounterError;
use visitcount_core::{ErrorBody, VisitsBody};

use crate::app_state::AppState;

/// Failure at the HTTP boundary. Renders the generic 500 body.
#[derive(Debug)]
pub struct InternalError {
    pub origin: HeaderValue,
    pub table: String,
    pub counter_id: String,
    pub source: CounterError,
}

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        tracing::error!(
            table = %self.table,
            id = %self.counter_id,
            code = self.source.client_code().as_str(),
            error = %self.source,
            "visit counter update failed"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.origin)],
            Json(ErrorBody::internal()),
        )
            .into_response()
    }
}

pub async fn visits(State(state): State<AppState>) -> Response {
    let origin = state.allow_origin();
    let metrics = state.metrics();

    let started = Instant::now();
    let result = state.client().increment_default().await;
    metrics.store_duration.observe(&[], started.elapsed());

    match result {
        Ok(visits) => {
            metrics.requests.inc(&[("outcome", "ok")]);
            tracing::debug!(visits, "visit counted");
            (
                StatusCode::OK,
                [(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin)],
                Json(VisitsBody { visits }),
            )
                .into_response()
        }
        Err(source) => {
            metrics
                .requests
                .inc(&[("outcome", "error"), ("code", source.client_code().as_str())]);
            let client = state.client();
            InternalError {
                origin,
                table: client.table().to_string(),
                counter_id: client.counter_id().to_string(),
                source,
            }
            .into_response()
        }
    }
}
