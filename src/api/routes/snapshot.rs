//! Snapshot Routes
//!
//! - GET /api/v1/snapshot - Plain-text support snapshot of the last 7 days

use axum::extract::State;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::routes::run_blocking;
use crate::api::state::AppState;

/// GET /api/v1/snapshot
///
/// Always covers the fixed snapshot window; there is no `days` parameter.
pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> ApiResult<String> {
    let service = Arc::clone(&state.service);
    run_blocking(move || service.snapshot()).await
}
