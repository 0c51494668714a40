//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not domain
//! types themselves. Check-ins and analyses serialize directly.

use serde::{Deserialize, Serialize};

/// `?days=` query parameter
///
/// Kept as a string so unparseable values fall back to the default
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct DaysParams {
    #[serde(default)]
    pub days: Option<String>,
}

/// Full health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Storage status: ok, error
    pub storage: String,
    /// Stored check-ins, when storage is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkins: Option<u64>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
