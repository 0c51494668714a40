//! Analysis Routes
//!
//! - GET /api/v1/analysis - Pattern analysis for a window of days

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::analysis::Analysis;
use crate::api::dto::DaysParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::run_blocking;
use crate::api::state::AppState;

/// GET /api/v1/analysis?days=N
///
/// `days` defaults to 7 and is clamped to 1..=365. An empty window is a
/// 404 with code `NO_DATA`.
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DaysParams>,
) -> ApiResult<Json<Analysis>> {
    let service = Arc::clone(&state.service);
    let days = service.resolve_days(params.days.as_deref(), service.settings().default_days);

    run_blocking(move || service.analyze(days))
        .await?
        .map(Json)
        .ok_or(ApiError::NoData)
}
