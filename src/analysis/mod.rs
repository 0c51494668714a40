//! Mood pattern analysis
//!
//! - **analyzer**: turns ascending check-in records into an [`Analysis`]
//! - **snapshot**: renders an analysis as shareable text
//! - **mean**: exact intensity means with half-to-even rounding
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use moodpulse::analysis::{format_snapshot, AnalyzerConfig, PatternAnalyzer};
//! use moodpulse::checkin::Vocabulary;
//!
//! let analyzer = PatternAnalyzer::new(Arc::new(Vocabulary::default()), AnalyzerConfig::default());
//! let analysis = analyzer.analyze(&[], 7);
//! assert_eq!(format_snapshot(analysis.as_ref()), "No mood data available yet.");
//! ```

mod analyzer;
mod mean;
mod snapshot;
mod types;

pub use analyzer::{AnalyzerConfig, PatternAnalyzer};
pub use mean::{round_tenths, Mean};
pub use snapshot::{format_snapshot, SnapshotFormatter, NO_DATA_MESSAGE};
pub use types::{Analysis, ContextInsight, InteractionImpact, MoodCount};
