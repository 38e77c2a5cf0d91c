//! The audio file record library.
//!
//! Owns the canonical collection of [`AudioFileRecord`]s. The collection
//! lives in memory behind a lock and is persisted as one JSON snapshot under
//! a single storage key on every mutation.

use crate::error::Result;
use crate::record::{AudioFileRecord, ConversationKind, Language, ProcessedRecord};
use crate::storage::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

/// Storage key for the record collection snapshot.
pub const RECORDS_KEY: &str = "audio_files";

/// Aggregate statistics over the library.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryStats {
    /// Sum of total cost over processed records only.
    pub total_cost: f64,
    /// Sum of duration over all records (pending records contribute 0).
    pub total_duration_seconds: f64,
    pub pending_count: usize,
    pub processed_count: usize,
    pub count_by_language: HashMap<Language, usize>,
    pub count_by_kind: HashMap<ConversationKind, usize>,
}

/// Persistent collection of audio file records.
pub struct RecordStore {
    records: RwLock<Vec<AudioFileRecord>>,
    storage: Arc<dyn KeyValueStore>,
}

impl RecordStore {
    /// Load the library from storage.
    ///
    /// An unparseable snapshot starts an empty collection rather than
    /// failing. Records whose audio asset no longer exists on disk are
    /// dropped, and the pruned snapshot is persisted immediately.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let mut records: Vec<AudioFileRecord> = match storage.get(RECORDS_KEY)? {
            Some(snapshot) => match serde_json::from_str(&snapshot) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Corrupt record snapshot, starting empty: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let before = records.len();
        records.retain(|r| r.asset_path().exists());
        let pruned = before - records.len();

        let store = Self {
            records: RwLock::new(records),
            storage,
        };

        if pruned > 0 {
            debug!("Pruned {} record(s) with missing audio assets", pruned);
            let records = store.records.read().unwrap();
            store.persist(&records)?;
        }

        Ok(store)
    }

    fn persist(&self, records: &[AudioFileRecord]) -> Result<()> {
        let snapshot = serde_json::to_string(records)?;
        self.storage.set(RECORDS_KEY, &snapshot)
    }

    /// Append a record and persist the snapshot.
    pub fn add(&self, record: AudioFileRecord) -> Result<()> {
        let mut records = self.records.write().unwrap();
        records.push(record);
        self.persist(&records)
    }

    /// Replace a pending record wholesale with its processed version.
    ///
    /// The id is preserved. A missing id is treated as already handled and
    /// ignored; so is a record that is no longer pending (the first commit
    /// for a given recording wins).
    pub fn replace_pending(&self, id: Uuid, processed: ProcessedRecord) -> Result<()> {
        let mut records = self.records.write().unwrap();
        match records.iter_mut().find(|r| r.id() == id) {
            Some(slot) if slot.is_pending() => {
                debug_assert_eq!(processed.id, id);
                *slot = AudioFileRecord::Processed(processed);
            }
            Some(_) => {
                warn!("Record {} is already processed, ignoring replacement", id);
                return Ok(());
            }
            None => {
                warn!("No record with id {} to replace, ignoring", id);
                return Ok(());
            }
        }
        self.persist(&records)
    }

    /// Delete records by id, removing their audio assets best-effort.
    ///
    /// Asset deletion failures are logged and ignored; the records are
    /// removed from the collection regardless. Unknown ids are skipped, so
    /// repeating a delete is harmless. The snapshot is persisted once after
    /// the whole batch.
    pub fn delete(&self, ids: &[Uuid]) -> Result<()> {
        let mut records = self.records.write().unwrap();

        for record in records.iter().filter(|r| ids.contains(&r.id())) {
            if let Err(e) = std::fs::remove_file(record.asset_path()) {
                warn!(
                    "Failed to delete audio asset {}: {}",
                    record.asset_path().display(),
                    e
                );
            }
        }

        records.retain(|r| !ids.contains(&r.id()));
        self.persist(&records)
    }

    /// Delete every record and its audio asset, then persist the empty
    /// collection.
    pub fn clear(&self) -> Result<()> {
        let mut records = self.records.write().unwrap();

        for record in records.iter() {
            if let Err(e) = std::fs::remove_file(record.asset_path()) {
                warn!(
                    "Failed to delete audio asset {}: {}",
                    record.asset_path().display(),
                    e
                );
            }
        }

        records.clear();
        self.persist(&records)
    }

    /// All records, newest first.
    pub fn records(&self) -> Vec<AudioFileRecord> {
        let records = self.records.read().unwrap();
        let mut out = records.clone();
        out.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        out
    }

    /// Look up a record by id.
    pub fn get(&self, id: Uuid) -> Option<AudioFileRecord> {
        let records = self.records.read().unwrap();
        records.iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// Total API spend across processed records.
    pub fn total_cost(&self) -> f64 {
        let records = self.records.read().unwrap();
        records.iter().map(|r| r.total_cost()).sum()
    }

    /// Total recorded duration across all records.
    pub fn total_duration_seconds(&self) -> f64 {
        let records = self.records.read().unwrap();
        records.iter().map(|r| r.duration_seconds()).sum()
    }

    pub fn pending_count(&self) -> usize {
        let records = self.records.read().unwrap();
        records.iter().filter(|r| r.is_pending()).count()
    }

    pub fn processed_count(&self) -> usize {
        let records = self.records.read().unwrap();
        records.iter().filter(|r| !r.is_pending()).count()
    }

    pub fn count_by_language(&self) -> HashMap<Language, usize> {
        let records = self.records.read().unwrap();
        let mut counts = HashMap::new();
        for record in records.iter() {
            *counts.entry(record.language()).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_by_kind(&self) -> HashMap<ConversationKind, usize> {
        let records = self.records.read().unwrap();
        let mut counts = HashMap::new();
        for record in records.iter() {
            *counts.entry(record.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Snapshot of all aggregates in one pass.
    pub fn stats(&self) -> LibraryStats {
        let records = self.records.read().unwrap();

        let mut stats = LibraryStats {
            total_cost: 0.0,
            total_duration_seconds: 0.0,
            pending_count: 0,
            processed_count: 0,
            count_by_language: HashMap::new(),
            count_by_kind: HashMap::new(),
        };

        for record in records.iter() {
            stats.total_cost += record.total_cost();
            stats.total_duration_seconds += record.duration_seconds();
            if record.is_pending() {
                stats.pending_count += 1;
            } else {
                stats.processed_count += 1;
            }
            *stats.count_by_language.entry(record.language()).or_insert(0) += 1;
            *stats.count_by_kind.entry(record.kind()).or_insert(0) += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PendingRecord, ProcessingOutcome};
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use std::path::{Path, PathBuf};

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"audio").unwrap();
        path
    }

    fn pending_at(path: PathBuf, kind: ConversationKind, language: Language) -> PendingRecord {
        PendingRecord {
            id: Uuid::new_v4(),
            filename: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("rec.m4a")
                .to_string(),
            asset_path: path,
            created_at: Utc::now(),
            kind,
            language,
            veterinary: None,
        }
    }

    fn outcome() -> ProcessingOutcome {
        ProcessingOutcome {
            duration_seconds: 90.0,
            transcript: "hello world".to_string(),
            summary: "a greeting".to_string(),
            transcription_cost: 0.009,
            summarization_cost: 0.0004,
            token_count: 200,
        }
    }

    #[test]
    fn test_add_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(MemoryStore::new());

        let store = RecordStore::load(storage.clone()).unwrap();
        let pending = pending_at(
            touch(dir.path(), "a.m4a"),
            ConversationKind::Personal,
            Language::English,
        );
        let record = AudioFileRecord::Pending(pending);
        store.add(record.clone()).unwrap();

        let reloaded = RecordStore::load(storage).unwrap();
        assert_eq!(reloaded.records(), vec![record]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::load(Arc::new(MemoryStore::new())).unwrap();

        let pending = pending_at(
            touch(dir.path(), "a.m4a"),
            ConversationKind::Personal,
            Language::English,
        );
        let id = pending.id;
        store.add(AudioFileRecord::Pending(pending)).unwrap();

        store.delete(&[id]).unwrap();
        assert!(store.is_empty());

        // Second delete of the same id changes nothing and does not error.
        store.delete(&[id]).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_pending_transitions_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::load(Arc::new(MemoryStore::new())).unwrap();

        let pending = pending_at(
            touch(dir.path(), "a.m4a"),
            ConversationKind::Personal,
            Language::English,
        );
        let id = pending.id;
        store.add(AudioFileRecord::Pending(pending.clone())).unwrap();
        assert_eq!(store.pending_count(), 1);
        assert_eq!(store.processed_count(), 0);

        let processed = pending.into_processed(outcome());
        store.replace_pending(id, processed.clone()).unwrap();

        assert_eq!(store.pending_count(), 0);
        assert_eq!(store.processed_count(), 1);
        let stored = store.get(id).unwrap();
        assert!(!stored.is_pending());
        match &stored {
            AudioFileRecord::Processed(r) => {
                assert_eq!(r.id, id);
                assert!(!r.transcript.is_empty());
                assert!(!r.summary.is_empty());
            }
            AudioFileRecord::Pending(_) => unreachable!(),
        }

        // A second replacement is ignored; the first commit wins.
        let mut other = processed;
        other.summary = "rewritten".to_string();
        store.replace_pending(id, other).unwrap();
        match store.get(id).unwrap() {
            AudioFileRecord::Processed(r) => assert_eq!(r.summary, "a greeting"),
            AudioFileRecord::Pending(_) => unreachable!(),
        }
    }

    #[test]
    fn test_replace_missing_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::load(Arc::new(MemoryStore::new())).unwrap();

        let pending = pending_at(
            touch(dir.path(), "a.m4a"),
            ConversationKind::Personal,
            Language::English,
        );
        let processed = pending.into_processed(outcome());
        store.replace_pending(processed.id, processed).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(RECORDS_KEY, "not json at all").unwrap();

        let store = RecordStore::load(storage).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_stale_assets_pruned_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(MemoryStore::new());

        let store = RecordStore::load(storage.clone()).unwrap();
        let kept = pending_at(
            touch(dir.path(), "kept.m4a"),
            ConversationKind::Personal,
            Language::English,
        );
        let stale = pending_at(
            touch(dir.path(), "stale.m4a"),
            ConversationKind::Couple,
            Language::Japanese,
        );
        let kept_id = kept.id;
        store.add(AudioFileRecord::Pending(kept)).unwrap();
        store.add(AudioFileRecord::Pending(stale.clone())).unwrap();

        std::fs::remove_file(&stale.asset_path).unwrap();

        let reloaded = RecordStore::load(storage.clone()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get(kept_id).is_some());

        // The pruned snapshot was written back.
        let snapshot = storage.get(RECORDS_KEY).unwrap().unwrap();
        let on_disk: Vec<AudioFileRecord> = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(on_disk.len(), 1);
    }

    #[test]
    fn test_aggregates() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::load(Arc::new(MemoryStore::new())).unwrap();

        let pending = pending_at(
            touch(dir.path(), "a.m4a"),
            ConversationKind::Couple,
            Language::Japanese,
        );
        store.add(AudioFileRecord::Pending(pending)).unwrap();

        let done = pending_at(
            touch(dir.path(), "b.m4a"),
            ConversationKind::Personal,
            Language::English,
        )
        .into_processed(outcome());
        store.add(AudioFileRecord::Processed(done)).unwrap();

        let stats = store.stats();
        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.processed_count, 1);
        // Pending records contribute nothing to cost or duration.
        assert!((stats.total_cost - 0.0094).abs() < 1e-12);
        assert!((stats.total_duration_seconds - 90.0).abs() < 1e-9);
        assert_eq!(stats.count_by_language[&Language::English], 1);
        assert_eq!(stats.count_by_language[&Language::Japanese], 1);
        assert_eq!(stats.count_by_kind[&ConversationKind::Couple], 1);
        assert_eq!(store.total_cost(), stats.total_cost);
        assert_eq!(store.pending_count(), 1);
    }

    #[test]
    fn test_records_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::load(Arc::new(MemoryStore::new())).unwrap();

        let mut old = pending_at(
            touch(dir.path(), "old.m4a"),
            ConversationKind::Personal,
            Language::English,
        );
        old.created_at = Utc::now() - chrono::Duration::hours(1);
        let new = pending_at(
            touch(dir.path(), "new.m4a"),
            ConversationKind::Personal,
            Language::English,
        );
        let new_id = new.id;

        store.add(AudioFileRecord::Pending(old)).unwrap();
        store.add(AudioFileRecord::Pending(new)).unwrap();

        assert_eq!(store.records()[0].id(), new_id);
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(MemoryStore::new());
        let store = RecordStore::load(storage.clone()).unwrap();

        let asset = touch(dir.path(), "a.m4a");
        store
            .add(AudioFileRecord::Pending(pending_at(
                asset.clone(),
                ConversationKind::Personal,
                Language::English,
            )))
            .unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(!asset.exists());
        assert_eq!(storage.get(RECORDS_KEY).unwrap().as_deref(), Some("[]"));
    }
}
