//! API Routes
//!
//! Route handlers organized by functionality.

pub mod analysis;
pub mod checkins;
pub mod health;
pub mod snapshot;
pub mod vocabulary;

use crate::api::error::{ApiError, ApiResult};
use crate::service::ServiceResult;

/// Run a synchronous service call on the blocking pool
pub(crate) async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}
