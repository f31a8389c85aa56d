// ============================================================================
// SNAPSHOT CACHE - Persisted copy of the logged-in student
// ============================================================================
// Staleness policy: the latest successful fetch always wins. Without a
// max age the snapshot is kept until it is replaced or cleared.
// ============================================================================

use chrono::{DateTime, Duration, Utc};

use crate::error::StorageError;
use crate::models::StudentRecord;
use crate::utils::{
    KeyValueStore, ADMISSION_NUMBER_KEY, SNAPSHOT_CACHED_AT_KEY, STUDENT_SNAPSHOT_KEY,
};

/// What the store held at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedSession {
    /// Neither marker nor snapshot.
    Empty,
    /// Only one of marker / snapshot survived.
    Partial,
    /// Marker and snapshot both present and usable.
    Valid {
        admission_number: String,
        student: StudentRecord,
        cached_at: Option<DateTime<Utc>>,
    },
    /// Marker and snapshot present but older than the configured max age.
    Expired { admission_number: String },
}

/// Raw values of every persisted key, taken before a save so a failed
/// save can be undone.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedEntries(Vec<(&'static str, Option<String>)>);

const PERSISTED_KEYS: [&str; 3] = [ADMISSION_NUMBER_KEY, STUDENT_SNAPSHOT_KEY, SNAPSHOT_CACHED_AT_KEY];

pub struct SnapshotCache<S: KeyValueStore> {
    store: S,
    max_age: Option<Duration>,
}

impl<S: KeyValueStore> SnapshotCache<S> {
    pub fn new(store: S) -> Self {
        Self { store, max_age: None }
    }

    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn admission_number(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .store
            .get(ADMISSION_NUMBER_KEY)?
            .filter(|value| !value.trim().is_empty()))
    }

    pub fn load(&self) -> Result<CachedSession, StorageError> {
        self.load_at(Utc::now())
    }

    /// Read marker, snapshot and timestamp as of `now`.
    /// A snapshot that fails to decode is `StorageError::Corrupt`.
    pub fn load_at(&self, now: DateTime<Utc>) -> Result<CachedSession, StorageError> {
        let admission_number = self.admission_number()?;
        let raw_snapshot = self.store.get(STUDENT_SNAPSHOT_KEY)?;

        let (admission_number, raw_snapshot) = match (admission_number, raw_snapshot) {
            (None, None) => return Ok(CachedSession::Empty),
            (Some(number), Some(raw)) => (number, raw),
            _ => return Ok(CachedSession::Partial),
        };

        let student: StudentRecord =
            serde_json::from_str(&raw_snapshot).map_err(|e| StorageError::Corrupt {
                key: STUDENT_SNAPSHOT_KEY.to_string(),
                reason: e.to_string(),
            })?;

        // Unreadable timestamps just mean "age unknown"
        let cached_at = self
            .store
            .get(SNAPSHOT_CACHED_AT_KEY)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|at| at.with_timezone(&Utc));

        if let (Some(max_age), Some(at)) = (self.max_age, cached_at) {
            let age = now.signed_duration_since(at);
            if age > max_age {
                log::info!("⌛ [CACHE] Snapshot expired ({} h old)", age.num_hours());
                return Ok(CachedSession::Expired { admission_number });
            }
        }

        Ok(CachedSession::Valid {
            admission_number,
            student,
            cached_at,
        })
    }

    /// Persist marker and snapshot together (login)
    pub fn save(&self, admission_number: &str, student: &StudentRecord) -> Result<(), StorageError> {
        self.store.set(ADMISSION_NUMBER_KEY, admission_number)?;
        self.save_snapshot(student)
    }

    /// Replace the snapshot only (update / refresh)
    pub fn save_snapshot(&self, student: &StudentRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string(student).map_err(|_| StorageError::Write {
            key: STUDENT_SNAPSHOT_KEY.to_string(),
        })?;
        self.store.set(STUDENT_SNAPSHOT_KEY, &json)?;
        self.store
            .set(SNAPSHOT_CACHED_AT_KEY, &Utc::now().to_rfc3339())?;
        log::debug!("💾 [CACHE] Snapshot saved for {}", student.admission_number);
        Ok(())
    }

    pub fn entries(&self) -> Result<PersistedEntries, StorageError> {
        let mut entries = Vec::with_capacity(PERSISTED_KEYS.len());
        for key in PERSISTED_KEYS {
            entries.push((key, self.store.get(key)?));
        }
        Ok(PersistedEntries(entries))
    }

    /// Put back entries taken by `entries()`. Keys that still hold their
    /// old value are not written again.
    pub fn restore(&self, entries: &PersistedEntries) -> Result<(), StorageError> {
        for (key, previous) in &entries.0 {
            if self.store.get(key)? == *previous {
                continue;
            }
            match previous {
                Some(value) => self.store.set(key, value)?,
                None => self.store.remove(key)?,
            }
        }
        log::debug!("↩️ [CACHE] Persisted session restored");
        Ok(())
    }

    /// Remove every persisted key; attempts all of them before reporting.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in PERSISTED_KEYS {
            if let Err(e) = self.store.remove(key) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
