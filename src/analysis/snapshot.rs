//! Snapshot Formatter
//!
//! Renders an [`Analysis`] as a short plain-text summary meant to be
//! shared with someone the user trusts.

use std::fmt::Write;

use crate::analysis::types::{Analysis, ContextInsight};

/// Text returned when there is nothing to summarise
pub const NO_DATA_MESSAGE: &str = "No mood data available yet.";

/// Closing line of every snapshot
const SNAPSHOT_FOOTER: &str =
    "This snapshot helps trusted people understand my recent mood patterns.";

/// Renders analyses as text snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotFormatter {
    max_contexts: usize,
}

impl Default for SnapshotFormatter {
    fn default() -> Self {
        Self { max_contexts: 5 }
    }
}

impl SnapshotFormatter {
    /// Create a formatter listing at most `max_contexts` context lines
    pub fn new(max_contexts: usize) -> Self {
        Self { max_contexts }
    }

    pub fn format(&self, analysis: Option<&Analysis>) -> String {
        let analysis = match analysis {
            Some(analysis) => analysis,
            None => return NO_DATA_MESSAGE.to_string(),
        };

        let impact = &analysis.interaction_impact;
        let sign = if impact.difference > 0.0 { "+" } else { "" };

        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "MoodPulse Support Snapshot (Last {} Days)\n\
             \n\
             Total Check-ins: {}\n\
             Most Common Mood: {} ({} times)\n\
             Average Intensity: {:.1}/10\n\
             \n\
             Human Interaction Insights:\n\
             - Average mood with others: {:.1}/10\n\
             - Average mood alone: {:.1}/10\n\
             - Impact: {}{:.1}\n\
             \n\
             Key Context Patterns:\n",
            analysis.window_days,
            analysis.total_entries,
            analysis.most_common_mood.mood,
            analysis.most_common_mood.count,
            analysis.avg_intensity,
            impact.with_others_avg,
            impact.alone_avg,
            sign,
            impact.difference,
        );

        for context in self.top_contexts(analysis) {
            let _ = writeln!(
                out,
                "- {}: {} times, avg intensity {:.1}/10",
                context.tag, context.count, context.avg_intensity
            );
        }

        out.push('\n');
        out.push_str(SNAPSHOT_FOOTER);
        out
    }

    /// Most frequent contexts first, ties in first-appearance order
    pub fn top_contexts<'a>(&self, analysis: &'a Analysis) -> Vec<&'a ContextInsight> {
        let mut contexts: Vec<&ContextInsight> = analysis.context_insights.iter().collect();
        contexts.sort_by(|a, b| b.count.cmp(&a.count));
        contexts.truncate(self.max_contexts);
        contexts
    }
}

/// Format with the default limit of five contexts
pub fn format_snapshot(analysis: Option<&Analysis>) -> String {
    SnapshotFormatter::default().format(analysis)
}
