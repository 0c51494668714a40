//! SQLite record store
//!
//! Check-ins live in a `checkins` table indexed on `timestamp`; their
//! context tags live in `checkin_tags`, one row per tag with its position
//! so submission order survives a round trip.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text (microsecond
//! precision), so lexical comparison in SQL equals time comparison.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OpenFlags};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::checkin::{CheckInRecord, NewCheckIn, MAX_INTENSITY, MIN_INTENSITY};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::{RecordStore, SortOrder};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS checkins (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp   TEXT NOT NULL,
        mood        TEXT NOT NULL,
        intensity   INTEGER NOT NULL CHECK (intensity BETWEEN 1 AND 10),
        notes       TEXT,
        created_at  TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_checkins_timestamp
        ON checkins(timestamp, id);

    CREATE TABLE IF NOT EXISTS checkin_tags (
        checkin_id  INTEGER NOT NULL REFERENCES checkins(id),
        position    INTEGER NOT NULL,
        tag         TEXT NOT NULL,
        PRIMARY KEY (checkin_id, position)
    );
";

/// rusqlite-backed [`RecordStore`]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Create or open a store at `path`
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        let store = Self::with_connection(conn, Some(path.to_path_buf()))?;
        tracing::info!(path = %path.display(), "Opened check-in database");
        Ok(store)
    }

    /// Create a private in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(format!("check-in database lock poisoned: {}", e)))
    }
}

impl RecordStore for SqliteStore {
    fn insert(&self, checkin: NewCheckIn) -> StorageResult<CheckInRecord> {
        // Stored precision is microseconds; return exactly what a fetch would
        let checkin = NewCheckIn {
            timestamp: checkin.timestamp.trunc_subsecs(6),
            created_at: checkin.created_at.trunc_subsecs(6),
            ..checkin
        };

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO checkins (timestamp, mood, intensity, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                encode_time(&checkin.timestamp),
                checkin.mood,
                checkin.intensity,
                checkin.notes,
                encode_time(&checkin.created_at),
            ],
        )?;
        let id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO checkin_tags (checkin_id, position, tag) VALUES (?1, ?2, ?3)",
            )?;
            for (position, tag) in checkin.context_tags.iter().enumerate() {
                stmt.execute(params![id, position as i64, tag])?;
            }
        }

        tx.commit()?;

        tracing::debug!(id, mood = %checkin.mood, "Inserted check-in");
        Ok(checkin.into_record(id))
    }

    fn fetch_since(
        &self,
        since: DateTime<Utc>,
        order: SortOrder,
    ) -> StorageResult<Vec<CheckInRecord>> {
        let conn = self.lock()?;
        let since = encode_time(&since);

        let sql = match order {
            SortOrder::Ascending => {
                "SELECT id, timestamp, mood, intensity, notes, created_at FROM checkins
                 WHERE timestamp >= ?1
                 ORDER BY timestamp ASC, id ASC"
            }
            SortOrder::Descending => {
                "SELECT id, timestamp, mood, intensity, notes, created_at FROM checkins
                 WHERE timestamp >= ?1
                 ORDER BY timestamp DESC, id DESC"
            }
        };

        let mut tags = fetch_tags_since(&conn, &since)?;

        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params![since], |row| {
            Ok(RawRow {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                mood: row.get(2)?,
                intensity: row.get(3)?,
                notes: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            let row = row?;
            let context_tags = tags.remove(&row.id).unwrap_or_default();
            records.push(row.into_record(context_tags)?);
        }

        Ok(records)
    }

    fn count(&self) -> StorageResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM checkins", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// A check-in row before decoding
struct RawRow {
    id: i64,
    timestamp: String,
    mood: String,
    intensity: i64,
    notes: Option<String>,
    created_at: String,
}

impl RawRow {
    fn into_record(self, context_tags: Vec<String>) -> StorageResult<CheckInRecord> {
        if !(MIN_INTENSITY as i64..=MAX_INTENSITY as i64).contains(&self.intensity) {
            return Err(StorageError::Corruption(format!(
                "check-in {} has intensity {} outside 1-10",
                self.id, self.intensity
            )));
        }

        Ok(CheckInRecord {
            id: self.id,
            timestamp: decode_time(&self.timestamp)?,
            mood: self.mood,
            intensity: self.intensity as u8,
            context_tags,
            notes: self.notes,
            created_at: decode_time(&self.created_at)?,
        })
    }
}

/// Load tags for every check-in in the window, keyed by check-in id
fn fetch_tags_since(conn: &Connection, since: &str) -> StorageResult<HashMap<i64, Vec<String>>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.checkin_id, t.tag FROM checkin_tags t
         JOIN checkins c ON c.id = t.checkin_id
         WHERE c.timestamp >= ?1
         ORDER BY t.checkin_id, t.position",
    )?;

    let rows = stmt.query_map(params![since], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut tags: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        let (id, tag) = row?;
        tags.entry(id).or_default().push(tag);
    }
    Ok(tags)
}

fn encode_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(raw: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Corruption(format!("bad timestamp '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn checkin(mood: &str, intensity: u8, tags: &[&str], at: DateTime<Utc>) -> NewCheckIn {
        NewCheckIn {
            timestamp: at,
            mood: mood.to_string(),
            intensity,
            context_tags: tags.iter().map(|t| t.to_string()).collect(),
            notes: None,
            created_at: at,
        }
    }

    #[test]
    fn test_store_creation() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_insert_assigns_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        let now = Utc::now();

        let a = store.insert(checkin("happy", 8, &["alone"], now)).unwrap();
        let b = store.insert(checkin("sad", 3, &[], now)).unwrap();

        assert!(b.id > a.id);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_fetch_since_filters_and_orders() {
        let store = SqliteStore::open_in_memory().unwrap();
        let now = Utc::now();

        store
            .insert(checkin("tired", 2, &[], now - Duration::days(10)))
            .unwrap();
        store
            .insert(checkin("calm", 6, &[], now - Duration::days(1)))
            .unwrap();
        store
            .insert(checkin("happy", 8, &[], now - Duration::days(3)))
            .unwrap();

        let since = now - Duration::days(7);
        let asc = store.fetch_since(since, SortOrder::Ascending).unwrap();
        let moods: Vec<&str> = asc.iter().map(|r| r.mood.as_str()).collect();
        assert_eq!(moods, vec!["happy", "calm"]);

        let desc = store.fetch_since(since, SortOrder::Descending).unwrap();
        let moods: Vec<&str> = desc.iter().map(|r| r.mood.as_str()).collect();
        assert_eq!(moods, vec!["calm", "happy"]);
    }

    #[test]
    fn test_equal_timestamps_order_by_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        let now = Utc::now();

        let first = store.insert(checkin("happy", 5, &[], now)).unwrap();
        let second = store.insert(checkin("sad", 5, &[], now)).unwrap();

        let asc = store
            .fetch_since(now - Duration::hours(1), SortOrder::Ascending)
            .unwrap();
        assert_eq!(asc[0].id, first.id);
        assert_eq!(asc[1].id, second.id);

        let desc = store
            .fetch_since(now - Duration::hours(1), SortOrder::Descending)
            .unwrap();
        assert_eq!(desc[0].id, second.id);
    }

    #[test]
    fn test_tags_round_trip_in_submission_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let now = Utc::now();

        let inserted = store
            .insert(checkin("anxious", 4, &["conflict", "at_work", "alone"], now))
            .unwrap();
        store.insert(checkin("calm", 6, &[], now)).unwrap();

        let records = store
            .fetch_since(now - Duration::minutes(1), SortOrder::Ascending)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], inserted);
        assert_eq!(
            records[0].context_tags,
            vec!["conflict", "at_work", "alone"]
        );
        assert!(records[1].context_tags.is_empty());
    }

    #[test]
    fn test_notes_preserved() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut new = checkin("content", 7, &[], Utc::now());
        new.notes = Some("quiet evening, tea".to_string());

        let record = store.insert(new).unwrap();
        let fetched = store
            .fetch_since(record.timestamp, SortOrder::Ascending)
            .unwrap();
        assert_eq!(fetched[0].notes.as_deref(), Some("quiet evening, tea"));
    }

    #[test]
    fn test_since_is_inclusive() {
        let store = SqliteStore::open_in_memory().unwrap();
        let record = store.insert(checkin("happy", 5, &[], Utc::now())).unwrap();

        let fetched = store
            .fetch_since(record.timestamp, SortOrder::Ascending)
            .unwrap();
        assert_eq!(fetched.len(), 1);
    }

    #[test]
    fn test_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("moodpulse.db");
        let now = Utc::now();

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(checkin("happy", 9, &["with_friends"], now)).unwrap();
        }

        {
            let store = SqliteStore::open(&path).unwrap();
            assert_eq!(store.count().unwrap(), 1);
            let records = store
                .fetch_since(now - Duration::days(1), SortOrder::Ascending)
                .unwrap();
            assert_eq!(records[0].context_tags, vec!["with_friends"]);
        }
    }

    #[test]
    fn test_time_encoding_sorts_lexically() {
        let early = Utc::now();
        let late = early + Duration::milliseconds(1500);
        assert!(encode_time(&early) < encode_time(&late));
        assert_eq!(decode_time(&encode_time(&early)).unwrap(), early.trunc_subsecs(6));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_time("yesterday"),
            Err(StorageError::Corruption(_))
        ));
    }
}
