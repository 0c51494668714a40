//! # MoodPulse
//!
//! Personal mood check-ins with interaction-aware pattern analysis.
//!
//! ## Features
//!
//! - **Check-ins**: mood, intensity and context tags from a fixed vocabulary
//! - **Pattern analysis**: dominant mood, per-context averages, and the
//!   difference between time spent with others and time spent alone
//! - **Support snapshot**: a short plain-text summary to share with someone
//! - **Durable storage**: SQLite record store behind a small trait
//!
//! ## Modules
//!
//! - [`checkin`]: Record types, vocabulary and submission validation
//! - [`storage`]: Record store trait and its SQLite/in-memory implementations
//! - [`analysis`]: Pattern analyzer and snapshot formatter
//! - [`service`]: Operations shared by the API and tests
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use moodpulse::analysis::{format_snapshot, AnalyzerConfig, PatternAnalyzer};
//! use moodpulse::checkin::{validate_submission, CheckInSubmission, Vocabulary};
//! use moodpulse::storage::{RecordStore, SortOrder, SqliteStore};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let vocabulary = Arc::new(Vocabulary::default());
//!     let store = SqliteStore::open("moodpulse.db")?;
//!
//!     let now = chrono::Utc::now();
//!     let submission = CheckInSubmission::new("happy").intensity(8).tag("alone");
//!     store.insert(validate_submission(submission, &vocabulary, 5, now)?)?;
//!
//!     let since = now - chrono::Duration::days(7);
//!     let records = store.fetch_since(since, SortOrder::Ascending)?;
//!
//!     let analyzer = PatternAnalyzer::new(vocabulary, AnalyzerConfig::default());
//!     let analysis = analyzer.analyze(&records, 7);
//!     println!("{}", format_snapshot(analysis.as_ref()));
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod checkin;
pub mod config;
pub mod logging;
pub mod service;
pub mod storage;

// Re-export top-level types for convenience
pub use analysis::{
    format_snapshot, Analysis, AnalyzerConfig, ContextInsight, InteractionImpact, MoodCount,
    PatternAnalyzer, SnapshotFormatter,
};

pub use checkin::{
    validate_submission, CheckInRecord, CheckInSubmission, NewCheckIn, ValidationError,
    Vocabulary, VocabularyError,
};

pub use storage::{
    InMemoryStore, RecordStore, SortOrder, SqliteStore, StorageError, StorageResult,
};

pub use service::{MoodService, ServiceError, ServiceResult};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{AnalysisConfig, ApiConfig, Config, ConfigError, LoggingConfig};
