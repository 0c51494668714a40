//! Mood Service
//!
//! The operations the outside world can invoke: submit a check-in, analyze
//! a window, render the support snapshot, list raw entries. Windows are
//! always clamped, never rejected.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::analysis::{Analysis, AnalyzerConfig, PatternAnalyzer, SnapshotFormatter};
use crate::checkin::{
    parse_int_saturating, validate_submission, CheckInRecord, CheckInSubmission, ValidationError,
    Vocabulary,
};
use crate::config::AnalysisConfig;
use crate::storage::{RecordStore, SortOrder, StorageError};

/// Errors surfaced by service operations
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The submission was rejected; nothing was stored
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Check-in submission and analysis over a record store
pub struct MoodService {
    store: Arc<dyn RecordStore>,
    vocabulary: Arc<Vocabulary>,
    analyzer: PatternAnalyzer,
    formatter: SnapshotFormatter,
    settings: AnalysisConfig,
}

impl MoodService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        vocabulary: Arc<Vocabulary>,
        settings: AnalysisConfig,
    ) -> Self {
        let analyzer = PatternAnalyzer::new(
            Arc::clone(&vocabulary),
            AnalyzerConfig {
                recent_entries: settings.recent_entries,
            },
        );
        let formatter = SnapshotFormatter::new(settings.snapshot_contexts);

        Self {
            store,
            vocabulary,
            analyzer,
            formatter,
            settings,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn settings(&self) -> &AnalysisConfig {
        &self.settings
    }

    /// Number of stored check-ins
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.store.count()?)
    }

    /// Validate and persist a check-in
    pub fn submit(&self, submission: CheckInSubmission) -> ServiceResult<CheckInRecord> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &self,
        submission: CheckInSubmission,
        now: DateTime<Utc>,
    ) -> ServiceResult<CheckInRecord> {
        let checkin = validate_submission(
            submission,
            &self.vocabulary,
            self.settings.default_intensity,
            now,
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected check-in");
            e
        })?;

        let record = self.store.insert(checkin)?;

        tracing::info!(
            id = record.id,
            mood = %record.mood,
            intensity = record.intensity,
            tags = record.context_tags.len(),
            "Recorded check-in"
        );
        Ok(record)
    }

    /// Resolve a raw `days` parameter
    ///
    /// Missing or unparseable input falls back to `default`; the result is
    /// clamped to `1..=max_days`.
    pub fn resolve_days(&self, raw: Option<&str>, default: u32) -> u32 {
        let days = raw.and_then(parse_int_saturating).unwrap_or(default as i64);
        self.settings.clamp_days(days)
    }

    /// Analyze the last `days` days; `None` when the window is empty
    pub fn analyze(&self, days: u32) -> ServiceResult<Option<Analysis>> {
        self.analyze_at(days, Utc::now())
    }

    pub fn analyze_at(&self, days: u32, now: DateTime<Utc>) -> ServiceResult<Option<Analysis>> {
        let days = self.settings.clamp_days(days as i64);
        let records = self.fetch_window(days, now, SortOrder::Ascending)?;

        tracing::debug!(days, records = records.len(), "Analyzing check-ins");
        Ok(self.analyzer.analyze(&records, days))
    }

    /// Render the support snapshot over the fixed snapshot window
    pub fn snapshot(&self) -> ServiceResult<String> {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> ServiceResult<String> {
        let analysis = self.analyze_at(self.settings.snapshot_days, now)?;
        Ok(self.formatter.format(analysis.as_ref()))
    }

    /// Raw check-ins from the last `days` days, newest first
    pub fn entries(&self, days: u32) -> ServiceResult<Vec<CheckInRecord>> {
        self.entries_at(days, Utc::now())
    }

    pub fn entries_at(&self, days: u32, now: DateTime<Utc>) -> ServiceResult<Vec<CheckInRecord>> {
        let days = self.settings.clamp_days(days as i64);
        self.fetch_window(days, now, SortOrder::Descending)
    }

    /// Records in `[now - days, now]`
    fn fetch_window(
        &self,
        days: u32,
        now: DateTime<Utc>,
        order: SortOrder,
    ) -> ServiceResult<Vec<CheckInRecord>> {
        let mut records = self.store.fetch_since(window_start(now, days), order)?;
        records.retain(|r| r.timestamp <= now);
        Ok(records)
    }
}

fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(days as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NO_DATA_MESSAGE;
    use crate::checkin::NewCheckIn;
    use crate::storage::{InMemoryStore, SqliteStore};

    fn service() -> MoodService {
        MoodService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(Vocabulary::default()),
            AnalysisConfig::default(),
        )
    }

    fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        now - Duration::days(days)
    }

    #[test]
    fn test_submit_and_analyze() {
        let service = service();
        let now = Utc::now();

        service
            .submit_at(
                CheckInSubmission::new("happy").intensity(8).tag("alone").at(days_ago(now, 3)),
                now,
            )
            .unwrap();
        service
            .submit_at(
                CheckInSubmission::new("happy").intensity(6).tag("with_friends").at(days_ago(now, 2)),
                now,
            )
            .unwrap();
        service
            .submit_at(
                CheckInSubmission::new("sad")
                    .intensity(3)
                    .tag("alone")
                    .tag("conflict")
                    .at(days_ago(now, 1)),
                now,
            )
            .unwrap();

        let analysis = service.analyze_at(7, now).unwrap().unwrap();
        assert_eq!(analysis.total_entries, 3);
        assert_eq!(analysis.avg_intensity, 5.7);
        assert_eq!(analysis.interaction_impact.difference, 0.5);
    }

    #[test]
    fn test_invalid_mood_stores_nothing() {
        let service = service();
        let err = service.submit(CheckInSubmission::new("grumpy")).unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidMood(_))));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_garbage_intensity_stored_as_default() {
        let service = service();
        let record = service
            .submit(CheckInSubmission::new("calm").intensity("abc"))
            .unwrap();
        assert_eq!(record.intensity, 5);
    }

    #[test]
    fn test_configured_default_intensity() {
        let settings = AnalysisConfig {
            default_intensity: 7,
            ..AnalysisConfig::default()
        };
        let service = MoodService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(Vocabulary::default()),
            settings,
        );
        let record = service.submit(CheckInSubmission::new("calm")).unwrap();
        assert_eq!(record.intensity, 7);
    }

    #[test]
    fn test_empty_window_is_absent() {
        let service = service();
        let now = Utc::now();
        service
            .submit_at(CheckInSubmission::new("tired").at(days_ago(now, 20)), now)
            .unwrap();

        assert!(service.analyze_at(7, now).unwrap().is_none());
        assert!(service.analyze_at(30, now).unwrap().is_some());
        assert_eq!(service.snapshot_at(now).unwrap(), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_snapshot_ignores_longer_windows() {
        let service = service();
        let now = Utc::now();
        service
            .submit_at(CheckInSubmission::new("sad").at(days_ago(now, 10)), now)
            .unwrap();
        service
            .submit_at(CheckInSubmission::new("happy").at(days_ago(now, 1)), now)
            .unwrap();

        let text = service.snapshot_at(now).unwrap();
        assert!(text.starts_with("MoodPulse Support Snapshot (Last 7 Days)"));
        assert!(text.contains("Total Check-ins: 1\n"));
        assert!(text.contains("Most Common Mood: happy (1 times)"));
    }

    #[test]
    fn test_entries_newest_first() {
        let service = service();
        let now = Utc::now();
        for (mood, days) in [("calm", 5), ("happy", 1), ("sad", 3), ("tired", 40)] {
            service
                .submit_at(CheckInSubmission::new(mood).at(days_ago(now, days)), now)
                .unwrap();
        }

        let entries = service.entries_at(30, now).unwrap();
        let moods: Vec<&str> = entries.iter().map(|r| r.mood.as_str()).collect();
        assert_eq!(moods, vec!["happy", "sad", "calm"]);
    }

    #[test]
    fn test_window_clamped_to_max() {
        let service = service();
        let now = Utc::now();
        service
            .submit_at(CheckInSubmission::new("calm").at(days_ago(now, 300)), now)
            .unwrap();
        service
            .submit_at(CheckInSubmission::new("calm").at(days_ago(now, 400)), now)
            .unwrap();

        assert_eq!(service.entries_at(10_000, now).unwrap().len(), 1);
        let analysis = service.analyze_at(10_000, now).unwrap().unwrap();
        assert_eq!(analysis.window_days, 365);
    }

    #[test]
    fn test_resolve_days() {
        let service = service();
        assert_eq!(service.resolve_days(Some("10000"), 7), 365);
        assert_eq!(service.resolve_days(Some("14"), 7), 14);
        assert_eq!(service.resolve_days(Some("0"), 7), 1);
        assert_eq!(service.resolve_days(Some("-3"), 7), 1);
        assert_eq!(service.resolve_days(Some("abc"), 7), 7);
        assert_eq!(service.resolve_days(Some(""), 30), 30);
        assert_eq!(service.resolve_days(None, 30), 30);
        assert_eq!(service.resolve_days(Some("99999999999999999999999"), 7), 365);
    }

    #[test]
    fn test_future_submission_rejected_and_not_stored() {
        let service = service();
        let now = Utc::now();

        let err = service
            .submit_at(CheckInSubmission::new("sad").intensity(10).at(now + Duration::days(400)), now)
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::FutureTimestamp(_))
        ));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_window_excludes_records_after_now() {
        let store = Arc::new(InMemoryStore::new());
        let service = MoodService::new(
            store.clone(),
            Arc::new(Vocabulary::default()),
            AnalysisConfig::default(),
        );
        let now = Utc::now();

        service
            .submit_at(CheckInSubmission::new("happy").intensity(2).at(days_ago(now, 1)), now)
            .unwrap();

        // Written directly, as an older build could have stored it
        let later = now + Duration::days(400);
        store
            .insert(NewCheckIn {
                timestamp: later,
                mood: "sad".to_string(),
                intensity: 10,
                context_tags: Vec::new(),
                notes: None,
                created_at: now,
            })
            .unwrap();

        let analysis = service.analyze_at(7, now).unwrap().unwrap();
        assert_eq!(analysis.total_entries, 1);
        assert_eq!(analysis.avg_intensity, 2.0);
        assert!(analysis.entries.iter().all(|r| r.timestamp <= now));

        let entries = service.entries_at(30, now).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, "happy");
    }

    #[test]
    fn test_works_over_sqlite() {
        let service = MoodService::new(
            Arc::new(SqliteStore::open_in_memory().unwrap()),
            Arc::new(Vocabulary::default()),
            AnalysisConfig::default(),
        );

        let record = service
            .submit(CheckInSubmission::new("energetic").intensity("9").tag("social_event"))
            .unwrap();
        assert_eq!(record.intensity, 9);

        let analysis = service.analyze(7).unwrap().unwrap();
        assert_eq!(analysis.interaction_impact.with_others_avg, 9.0);
        assert_eq!(analysis.recent_entries, vec![record]);
    }
}
