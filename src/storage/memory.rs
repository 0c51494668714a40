//! In-memory record store

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

use crate::checkin::{CheckInRecord, NewCheckIn};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::{RecordStore, SortOrder};

/// `Vec`-backed [`RecordStore`]; contents are lost on drop
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<CheckInRecord>,
    next_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| StorageError::Lock(format!("in-memory store lock poisoned: {}", e)))
    }
}

impl RecordStore for InMemoryStore {
    fn insert(&self, checkin: NewCheckIn) -> StorageResult<CheckInRecord> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let record = checkin.into_record(inner.next_id);
        inner.records.push(record.clone());
        Ok(record)
    }

    fn fetch_since(
        &self,
        since: DateTime<Utc>,
        order: SortOrder,
    ) -> StorageResult<Vec<CheckInRecord>> {
        let inner = self.lock()?;
        let mut records: Vec<CheckInRecord> = inner
            .records
            .iter()
            .filter(|r| r.timestamp >= since)
            .cloned()
            .collect();

        records.sort_by_key(|r| (r.timestamp, r.id));
        if order == SortOrder::Descending {
            records.reverse();
        }
        Ok(records)
    }

    fn count(&self) -> StorageResult<u64> {
        Ok(self.lock()?.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn checkin(mood: &str, at: DateTime<Utc>) -> NewCheckIn {
        NewCheckIn {
            timestamp: at,
            mood: mood.to_string(),
            intensity: 5,
            context_tags: Vec::new(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_out_of_order_inserts_come_back_sorted() {
        let store = InMemoryStore::new();
        let now = Utc::now();

        store.insert(checkin("calm", now - Duration::hours(1))).unwrap();
        store.insert(checkin("happy", now - Duration::hours(5))).unwrap();
        store.insert(checkin("old", now - Duration::days(30))).unwrap();

        let asc = store
            .fetch_since(now - Duration::days(1), SortOrder::Ascending)
            .unwrap();
        let moods: Vec<&str> = asc.iter().map(|r| r.mood.as_str()).collect();
        assert_eq!(moods, vec!["happy", "calm"]);

        let desc = store
            .fetch_since(now - Duration::days(1), SortOrder::Descending)
            .unwrap();
        assert_eq!(desc[0].mood, "calm");
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_ids_increase() {
        let store = InMemoryStore::new();
        let a = store.insert(checkin("a", Utc::now())).unwrap();
        let b = store.insert(checkin("b", Utc::now())).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }
}
