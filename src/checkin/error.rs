//! Check-in error types

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised when a submission cannot become a check-in
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No mood was submitted
    #[error("Mood is required")]
    MissingMood,

    /// Mood is not part of the vocabulary
    #[error("Invalid mood selected: {0}")]
    InvalidMood(String),

    /// Timestamp lies after the moment of submission
    #[error("Timestamp {0} is in the future")]
    FutureTimestamp(DateTime<Utc>),

    /// Timestamp lies before the Unix epoch
    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(DateTime<Utc>),
}

/// Errors raised when building a vocabulary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("Vocabulary list '{0}' cannot be empty")]
    Empty(&'static str),

    #[error("Interaction tag '{0}' is not a context tag")]
    UnknownInteractionTag(String),

    #[error("Alone tag '{0}' is not a context tag")]
    UnknownAloneTag(String),
}
