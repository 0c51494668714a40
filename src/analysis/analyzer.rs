//! Pattern Analyzer
//!
//! Single pass over an ascending list of check-ins producing an
//! [`Analysis`]. The analyzer holds only read-only configuration, so one
//! instance can serve any number of concurrent callers.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::analysis::mean::Mean;
use crate::analysis::types::{Analysis, ContextInsight, InteractionImpact, MoodCount};
use crate::checkin::{CheckInRecord, Vocabulary};

/// Tunables for the analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// How many of the newest records to echo back in `recent_entries`
    pub recent_entries: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { recent_entries: 10 }
    }
}

/// Turns check-in records into summary statistics
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    vocabulary: Arc<Vocabulary>,
    config: AnalyzerConfig,
}

impl PatternAnalyzer {
    pub fn new(vocabulary: Arc<Vocabulary>, config: AnalyzerConfig) -> Self {
        Self { vocabulary, config }
    }

    /// Analyze records sorted by ascending timestamp
    ///
    /// Returns `None` when there is nothing to analyze. Tags outside the
    /// vocabulary are ignored; a tag repeated on one record counts once.
    pub fn analyze(&self, records: &[CheckInRecord], window_days: u32) -> Option<Analysis> {
        if records.is_empty() {
            return None;
        }

        let mut overall = Mean::default();
        let mut moods = MoodTally::default();
        let mut contexts = ContextTally::default();
        let mut with_others = Mean::default();
        let mut alone = Mean::default();

        for record in records {
            overall.add(record.intensity);
            moods.add(&record.mood);

            let mut seen: Vec<&str> = Vec::with_capacity(record.context_tags.len());
            for tag in &record.context_tags {
                if !self.vocabulary.is_context_tag(tag) || seen.contains(&tag.as_str()) {
                    continue;
                }
                seen.push(tag);
                contexts.add(tag, record);
            }

            if seen.iter().any(|t| self.vocabulary.is_interaction_tag(t)) {
                with_others.add(record.intensity);
            }
            if record.has_tag(self.vocabulary.alone_tag()) {
                alone.add(record.intensity);
            }
        }

        let mood_distribution = moods.distribution();
        // Non-empty input guarantees at least one mood
        let most_common_mood = mood_distribution.first()?.clone();

        let recent_start = records.len().saturating_sub(self.config.recent_entries);

        Some(Analysis {
            window_days,
            total_entries: records.len(),
            most_common_mood,
            mood_distribution,
            avg_intensity: overall.rounded(),
            context_insights: contexts.into_insights(),
            interaction_impact: InteractionImpact {
                with_others_avg: with_others.rounded(),
                alone_avg: alone.rounded(),
                difference: with_others.difference(&alone),
                with_others_entries: with_others.count(),
                alone_entries: alone.count(),
            },
            recent_entries: records[recent_start..].to_vec(),
            entries: records.to_vec(),
        })
    }
}

/// Mood counts in first-occurrence order
#[derive(Default)]
struct MoodTally {
    counts: Vec<MoodCount>,
}

impl MoodTally {
    fn add(&mut self, mood: &str) {
        match self.counts.iter_mut().find(|c| c.mood == mood) {
            Some(entry) => entry.count += 1,
            None => self.counts.push(MoodCount {
                mood: mood.to_string(),
                count: 1,
            }),
        }
    }

    /// Most frequent first; the stable sort keeps first-seen order on ties
    fn distribution(mut self) -> Vec<MoodCount> {
        self.counts.sort_by(|a, b| b.count.cmp(&a.count));
        self.counts
    }
}

/// Per-tag accumulators in first-appearance order
#[derive(Default)]
struct ContextTally {
    index: HashMap<String, usize>,
    tags: Vec<TagStats>,
}

struct TagStats {
    tag: String,
    intensity: Mean,
    moods: BTreeMap<String, usize>,
}

impl ContextTally {
    fn add(&mut self, tag: &str, record: &CheckInRecord) {
        let slot = match self.index.get(tag) {
            Some(&slot) => slot,
            None => {
                self.tags.push(TagStats {
                    tag: tag.to_string(),
                    intensity: Mean::default(),
                    moods: BTreeMap::new(),
                });
                self.index.insert(tag.to_string(), self.tags.len() - 1);
                self.tags.len() - 1
            }
        };

        let stats = &mut self.tags[slot];
        stats.intensity.add(record.intensity);
        *stats.moods.entry(record.mood.clone()).or_insert(0) += 1;
    }

    fn into_insights(self) -> Vec<ContextInsight> {
        self.tags
            .into_iter()
            .map(|stats| ContextInsight {
                count: stats.intensity.count(),
                avg_intensity: stats.intensity.rounded(),
                tag: stats.tag,
                mood_distribution: stats.moods,
            })
            .collect()
    }
}
