//! MoodPulse Record Store
//!
//! Persistence for check-in records behind the [`RecordStore`] trait:
//!
//! - **sqlite**: rusqlite-backed store used by the server
//! - **memory**: `Vec`-backed store for tests and embedding
//! - **error**: Error types
//!
//! A store only has to do two things: insert one validated check-in and
//! hand back every record at or after a point in time, ordered by
//! timestamp. Everything else (validation, windowing, analysis) lives
//! above it.
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::{Duration, Utc};
//! use moodpulse::storage::{RecordStore, SortOrder, SqliteStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::open("./moodpulse.db")?;
//!     let week = store.fetch_since(Utc::now() - Duration::days(7), SortOrder::Ascending)?;
//!     println!("{} check-ins this week", week.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod memory;
pub mod sqlite;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkin::{CheckInRecord, NewCheckIn};

/// Ordering of records returned by [`RecordStore::fetch_since`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Ascending,
    /// Newest first
    Descending,
}

/// An ordered store of check-in records
///
/// Records with equal timestamps are ordered by id, so both orderings are
/// exact reverses of each other.
pub trait RecordStore: Send + Sync {
    /// Persist a validated check-in and return it with its assigned id
    fn insert(&self, checkin: NewCheckIn) -> StorageResult<CheckInRecord>;

    /// Fetch every record with `timestamp >= since`
    fn fetch_since(
        &self,
        since: DateTime<Utc>,
        order: SortOrder,
    ) -> StorageResult<Vec<CheckInRecord>>;

    /// Total number of stored records
    fn count(&self) -> StorageResult<u64>;
}
