//! Limits Route
//!
//! Exposes the demo ceilings so the caller can display them up front.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use pipeline::PREVIEW_ROWS;

use crate::SharedState;

/// Demo ceilings for display.
#[derive(Debug, Serialize)]
pub struct LimitsResponse {
    pub max_file_bytes: u64,
    pub max_rows: usize,
    pub preview_rows: usize,
}

/// Report the process-wide limits.
pub async fn get_limits(State(state): State<SharedState>) -> Json<LimitsResponse> {
    let guard = state.read().await;
    Json(LimitsResponse {
        max_file_bytes: guard.settings.limits.max_file_bytes,
        max_rows: guard.settings.limits.max_rows,
        preview_rows: PREVIEW_ROWS,
    })
}
