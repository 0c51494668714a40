//! Submission validation
//!
//! Turns raw [`CheckInSubmission`] input into a [`NewCheckIn`]:
//! - mood must belong to the vocabulary, otherwise the submission is rejected
//! - intensity falls back to the default when missing or not an integer,
//!   then is clamped to 1..=10
//! - unknown context tags are dropped, duplicates collapse to the first one
//! - an explicit timestamp must lie between the Unix epoch and `now`

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::checkin::error::ValidationError;
use crate::checkin::types::{CheckInSubmission, NewCheckIn};
use crate::checkin::vocabulary::Vocabulary;

/// Lowest allowed intensity
pub const MIN_INTENSITY: u8 = 1;
/// Highest allowed intensity
pub const MAX_INTENSITY: u8 = 10;
/// Intensity used when none (or garbage) is submitted
pub const DEFAULT_INTENSITY: u8 = 5;

/// Validate a submission against a vocabulary
///
/// `now` becomes `created_at`, and `timestamp` when the submission
/// carries none. Future timestamps are rejected.
pub fn validate_submission(
    submission: CheckInSubmission,
    vocabulary: &Vocabulary,
    default_intensity: u8,
    now: DateTime<Utc>,
) -> Result<NewCheckIn, ValidationError> {
    let mood = match submission.mood {
        Some(mood) if !mood.is_empty() => mood,
        _ => return Err(ValidationError::MissingMood),
    };

    if !vocabulary.is_mood(&mood) {
        return Err(ValidationError::InvalidMood(mood));
    }

    let timestamp = match submission.timestamp {
        Some(ts) if ts > now => return Err(ValidationError::FutureTimestamp(ts)),
        Some(ts) if ts < DateTime::<Utc>::UNIX_EPOCH => {
            return Err(ValidationError::TimestampOutOfRange(ts))
        }
        Some(ts) => ts,
        None => now,
    };

    let intensity = parse_intensity(submission.intensity.as_ref(), default_intensity);
    let context_tags = filter_tags(submission.context_tags, vocabulary);

    Ok(NewCheckIn {
        timestamp,
        mood,
        intensity,
        context_tags,
        notes: submission.notes,
        created_at: now,
    })
}

/// Parse a loosely-typed intensity
///
/// Integers and integer strings of any size are accepted and clamped;
/// everything else yields `default` (itself clamped).
pub fn parse_intensity(raw: Option<&Value>, default: u8) -> u8 {
    let parsed = match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => parse_int_saturating(s),
        _ => None,
    };

    let value = parsed.unwrap_or(default as i64);
    value.clamp(MIN_INTENSITY as i64, MAX_INTENSITY as i64) as u8
}

/// Parse an integer, saturating oversized digit strings
///
/// Accepts optional surrounding whitespace and a leading sign.
pub fn parse_int_saturating(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(if negative { i64::MIN } else { i64::MAX })
    } else {
        None
    }
}

/// Keep known tags in submission order, dropping unknowns and repeats
pub fn filter_tags(tags: Vec<String>, vocabulary: &Vocabulary) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if vocabulary.is_context_tag(&tag) && !kept.contains(&tag) {
            kept.push(tag);
        }
    }
    kept
}
