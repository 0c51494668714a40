//! Vocabulary Routes
//!
//! - GET /api/v1/vocabulary - Allowed moods and context tags

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::checkin::Vocabulary;

/// GET /api/v1/vocabulary
pub async fn get_vocabulary(State(state): State<Arc<AppState>>) -> Json<Vocabulary> {
    Json(state.service.vocabulary().clone())
}
