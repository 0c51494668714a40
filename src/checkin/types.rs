//! Core check-in types
//!
//! - `CheckInRecord`: a persisted mood observation
//! - `NewCheckIn`: a validated observation waiting to be stored
//! - `CheckInSubmission`: raw, unvalidated user input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single persisted mood check-in
///
/// Records are created once and never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckInRecord {
    /// Store-assigned identifier
    pub id: i64,
    /// When the entry logically occurred
    pub timestamp: DateTime<Utc>,
    /// Mood label from the vocabulary
    pub mood: String,
    /// Intensity on a 1-10 scale
    pub intensity: u8,
    /// Context tags in submission order, without duplicates
    #[serde(default)]
    pub context_tags: Vec<String>,
    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl CheckInRecord {
    /// Check whether this record carries a context tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.context_tags.iter().any(|t| t == tag)
    }
}

/// A validated check-in that has not been persisted yet
///
/// Only [`crate::checkin::validate_submission`] builds these from user
/// input, so every instance satisfies the vocabulary and range invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCheckIn {
    pub timestamp: DateTime<Utc>,
    pub mood: String,
    pub intensity: u8,
    pub context_tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewCheckIn {
    /// Attach a store-assigned id
    pub fn into_record(self, id: i64) -> CheckInRecord {
        CheckInRecord {
            id,
            timestamp: self.timestamp,
            mood: self.mood,
            intensity: self.intensity,
            context_tags: self.context_tags,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}

/// Raw check-in input as submitted by a client
///
/// `intensity` is kept loose: a number, a numeric string, or garbage.
/// Anything that is not an integer falls back to the default intensity.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckInSubmission {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub intensity: Option<serde_json::Value>,
    #[serde(default)]
    pub context_tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Optional logical timestamp, defaults to now
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl CheckInSubmission {
    /// Create a submission for a mood
    pub fn new(mood: impl Into<String>) -> Self {
        Self {
            mood: Some(mood.into()),
            ..Default::default()
        }
    }

    /// Builder method: set intensity from any JSON value
    pub fn intensity(mut self, intensity: impl Into<serde_json::Value>) -> Self {
        self.intensity = Some(intensity.into());
        self
    }

    /// Builder method: add a context tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.context_tags.push(tag.into());
        self
    }

    /// Builder method: set notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder method: set the logical timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
