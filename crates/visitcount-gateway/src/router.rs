//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

/// Path of the counter endpoint.
pub const VISITS_PATH: &str = "/visits";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(VISITS_PATH, get(transport::visits::visits))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
