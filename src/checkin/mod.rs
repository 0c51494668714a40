//! Check-in domain
//!
//! Types for mood check-ins, the vocabulary they are drawn from, and the
//! validation that guards every record before it reaches a store.

mod error;
mod types;
mod validation;
mod vocabulary;

pub use error::{ValidationError, VocabularyError};
pub use types::{CheckInRecord, CheckInSubmission, NewCheckIn};
pub use validation::{
    filter_tags, parse_int_saturating, parse_intensity, validate_submission, DEFAULT_INTENSITY,
    MAX_INTENSITY, MIN_INTENSITY,
};
pub use vocabulary::Vocabulary;
