//! Check-in Routes
//!
//! - POST /api/v1/checkins - Submit a check-in
//! - GET /api/v1/entries - Raw check-ins for a window, newest first

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::DaysParams;
use crate::api::error::ApiResult;
use crate::api::routes::run_blocking;
use crate::api::state::AppState;
use crate::checkin::{CheckInRecord, CheckInSubmission};

/// POST /api/v1/checkins
///
/// Validates and stores one check-in. Malformed bodies, an unknown mood
/// and future timestamps are rejected with 400; intensity and tags are
/// repaired silently.
pub async fn submit_checkin(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckInSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CheckInRecord>)> {
    let Json(submission) = payload?;
    let service = Arc::clone(&state.service);
    let record = run_blocking(move || service.submit(submission)).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/entries?days=N
///
/// Defaults to the configured entries window (30 days).
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DaysParams>,
) -> ApiResult<Json<Vec<CheckInRecord>>> {
    let service = Arc::clone(&state.service);
    let days = service.resolve_days(
        params.days.as_deref(),
        service.settings().entries_default_days,
    );

    let entries = run_blocking(move || service.entries(days)).await?;
    Ok(Json(entries))
}
