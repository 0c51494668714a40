//! Analysis result types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::checkin::CheckInRecord;

/// Summary of check-ins over a window of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Window the records were drawn from
    pub window_days: u32,
    /// Number of records analyzed
    pub total_entries: usize,
    /// Most frequent mood, ties go to the mood seen first
    pub most_common_mood: MoodCount,
    /// Every observed mood, most frequent first
    pub mood_distribution: Vec<MoodCount>,
    /// Mean intensity, one decimal
    pub avg_intensity: f64,
    /// Per-tag breakdown in order of first appearance
    pub context_insights: Vec<ContextInsight>,
    /// With-others vs. alone comparison
    pub interaction_impact: InteractionImpact,
    /// The most recent records, oldest first
    pub recent_entries: Vec<CheckInRecord>,
    /// Every analyzed record, oldest first
    pub entries: Vec<CheckInRecord>,
}

/// A mood and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: usize,
}

/// Statistics for records carrying one context tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextInsight {
    pub tag: String,
    /// Records carrying the tag
    pub count: usize,
    /// Mean intensity of those records, one decimal
    pub avg_intensity: f64,
    /// Mood -> number of those records
    pub mood_distribution: BTreeMap<String, usize>,
}

/// Mean intensity with others vs. alone
///
/// An empty side has a mean of 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionImpact {
    pub with_others_avg: f64,
    pub alone_avg: f64,
    /// `with_others_avg - alone_avg`, computed before rounding
    pub difference: f64,
    pub with_others_entries: usize,
    pub alone_entries: usize,
}
