use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::candidates::validation::record_from_value;
use crate::models::{CandidateId, CandidateProfile, CandidateRecord, MAX_CANDIDATE_ID};
use crate::store::{CandidateStore, StoreError};

/// Raw read/write access to the single persisted blob.
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// `Ok(None)` when nothing has been written yet.
    async fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the blob wholesale.
    async fn write(&self, blob: String) -> Result<(), StoreError>;
}

/// `CandidateStore` over any blob backend.
///
/// Inserts and deletes are serialized within this process. Writers in other
/// processes are not coordinated with: the last write wins.
pub struct BlobCandidateStore<B> {
    backend: B,
    write_lock: Mutex<()>,
}

impl<B: BlobBackend> BlobCandidateStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Read failures propagate. Bytes that were read but do not decode count
    /// as an empty collection.
    async fn load(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        let blob = self.backend.read().await?;
        Ok(blob.as_deref().map(decode_collection).unwrap_or_default())
    }

    async fn persist(&self, records: &[CandidateRecord]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(records)?;
        self.backend.write(blob).await
    }
}

#[async_trait]
impl<B: BlobBackend> CandidateStore for BlobCandidateStore<B> {
    async fn list(&self) -> Vec<CandidateRecord> {
        self.load().await.unwrap_or_else(|e| {
            warn!("Candidate storage unreadable, listing as empty: {e}");
            Vec::new()
        })
    }

    async fn insert(&self, profile: CandidateProfile) -> Result<CandidateRecord, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let now = Utc::now();
        let id = next_id(&records, now.timestamp_millis())?;
        let record = CandidateRecord::new(id, now, profile);

        records.push(record.clone());
        self.persist(&records).await?;

        info!(
            "Saved candidate {id} ({}), collection size {}",
            record.profile.display_name(),
            records.len()
        );
        Ok(record)
    }

    async fn delete(&self, id: CandidateId) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            debug!("Delete of unknown candidate {id} ignored");
            return Ok(());
        }

        self.persist(&records).await?;
        info!("Deleted candidate {id}, collection size {}", records.len());
        Ok(())
    }
}

/// Decodes a stored collection. Invalid JSON or a non-array blob reads as an
/// empty collection. Individual records without a usable id, or repeating
/// an earlier id, are skipped.
pub fn decode_collection(blob: &str) -> Vec<CandidateRecord> {
    let items = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("Candidate storage does not hold an array, treating as empty");
            return Vec::new();
        }
        Err(e) => {
            warn!("Candidate storage is not valid JSON, treating as empty: {e}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match record_from_value(item) {
            Ok(record) if seen.insert(record.id) => records.push(record),
            Ok(record) => warn!("Skipping stored record {index}: duplicate id {}", record.id),
            Err(e) => warn!("Skipping stored record {index}: {e}"),
        }
    }
    let legacy = records.iter().filter(|r| r.is_legacy()).count();
    if legacy > 0 {
        debug!("Read {legacy} legacy candidate records");
    }
    records
}

/// Creation time in millis, bumped past the largest existing id.
pub fn next_id(records: &[CandidateRecord], now_millis: i64) -> Result<CandidateId, StoreError> {
    let id = match records.iter().map(|r| r.id).max() {
        Some(max) => {
            let bumped = max.checked_add(1).ok_or(StoreError::IdsExhausted(max))?;
            now_millis.max(bumped)
        }
        None => now_millis,
    };
    if id > MAX_CANDIDATE_ID {
        return Err(StoreError::IdsExhausted(MAX_CANDIDATE_ID));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CURRENT_SCHEMA_VERSION;
    use crate::store::MemoryBlob;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn profile(name: &str) -> CandidateProfile {
        CandidateProfile {
            name: Some(name.to_string()),
            skills: vec!["Go".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = BlobCandidateStore::new(MemoryBlob::default());
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_list_contains_record_with_fresh_id() {
        let store = BlobCandidateStore::new(MemoryBlob::default());
        let a = store.insert(profile("A")).await.unwrap();
        let b = store.insert(profile("B")).await.unwrap();
        let c = store.insert(profile("C")).await.unwrap();

        assert!(a.id < b.id && b.id < c.id, "ids must be unique and increasing");
        assert_eq!(c.schema_version, CURRENT_SCHEMA_VERSION);

        let listed = store.list().await;
        let names: Vec<_> = listed.iter().map(|r| r.profile.display_name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(listed[2], c);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let store = BlobCandidateStore::new(MemoryBlob::default());
        let a = store.insert(profile("A")).await.unwrap();
        let b = store.insert(profile("B")).await.unwrap();
        let c = store.insert(profile("C")).await.unwrap();

        store.delete(b.id).await.unwrap();

        let listed = store.list().await;
        assert_eq!(listed, vec![a, c]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let store = BlobCandidateStore::new(MemoryBlob::default());
        let a = store.insert(profile("A")).await.unwrap();

        store.delete(a.id + 999).await.unwrap();

        assert_eq!(store.list().await, vec![a]);
    }

    #[tokio::test]
    async fn test_corrupt_storage_lists_empty() {
        let store = BlobCandidateStore::new(MemoryBlob::with_contents("{not json"));
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_over_corrupt_storage_starts_fresh() {
        let store = BlobCandidateStore::new(MemoryBlob::with_contents("]["));
        let a = store.insert(profile("A")).await.unwrap();
        assert_eq!(store.list().await, vec![a]);
    }

    #[tokio::test]
    async fn test_legacy_blob_is_readable_and_preserved_on_write() {
        let legacy = r#"[{"id":1700000000000,"timestamp":"2023-11-14T22:13:20.000Z","name":"Old","skills":["Go","SQL"],"experience":[],"education":[],"projects":[]}]"#;
        let store = BlobCandidateStore::new(MemoryBlob::with_contents(legacy));

        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_legacy());

        let fresh = store.insert(profile("New")).await.unwrap();
        assert!(fresh.id > 1_700_000_000_000);

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].profile.skills, vec!["Go", "SQL"]);
        assert!(listed[0].is_legacy());
    }

    #[test]
    fn test_decode_skips_records_without_id_and_duplicates() {
        let blob = r#"[{"id":1,"name":"A"},{"name":"no id"},{"id":1,"name":"dup"},{"id":2}]"#;
        let records = decode_collection(blob);
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(records[0].profile.name.as_deref(), Some("A"));
    }

    #[test]
    fn test_decode_non_array_is_empty() {
        assert!(decode_collection(r#"{"id":1}"#).is_empty());
    }

    #[test]
    fn test_next_id_uses_clock_when_ahead() {
        let records = decode_collection(r#"[{"id":10}]"#);
        assert_eq!(next_id(&records, 500).unwrap(), 500);
    }

    #[test]
    fn test_next_id_bumps_past_existing_when_clock_behind() {
        let records = decode_collection(r#"[{"id":10},{"id":900}]"#);
        assert_eq!(next_id(&records, 500).unwrap(), 901);
        assert_eq!(next_id(&[], 500).unwrap(), 500);
    }

    #[test]
    fn test_next_id_fails_instead_of_overflowing() {
        let top = CandidateRecord::new(i64::MAX, Utc::now(), CandidateProfile::default());
        assert!(matches!(
            next_id(&[top], 500),
            Err(StoreError::IdsExhausted(i64::MAX))
        ));

        let last = CandidateRecord::new(MAX_CANDIDATE_ID, Utc::now(), CandidateProfile::default());
        assert!(next_id(&[last], 500).is_err());
    }

    #[tokio::test]
    async fn test_insert_after_huge_stored_id_does_not_panic() {
        let store = BlobCandidateStore::new(MemoryBlob::with_contents(
            r#"[{"id": 1e300, "name": "X"}, {"id": 3, "name": "Y"}]"#,
        ));
        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 3);

        let fresh = store.insert(profile("Z")).await.unwrap();
        assert!(fresh.id > 3);
    }

    /// Memory blob whose reads can be switched to fail.
    #[derive(Default)]
    struct FlakyBlob {
        inner: MemoryBlob,
        fail_reads: AtomicBool,
    }

    #[async_trait]
    impl BlobBackend for FlakyBlob {
        async fn read(&self) -> Result<Option<String>, StoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(std::io::Error::from(std::io::ErrorKind::TimedOut).into());
            }
            self.inner.read().await
        }

        async fn write(&self, blob: String) -> Result<(), StoreError> {
            self.inner.write(blob).await
        }
    }

    #[tokio::test]
    async fn test_failed_read_never_overwrites_stored_records() {
        let store = BlobCandidateStore::new(FlakyBlob::default());
        let a = store.insert(profile("A")).await.unwrap();
        let b = store.insert(profile("B")).await.unwrap();
        let c = store.insert(profile("C")).await.unwrap();

        store.backend.fail_reads.store(true, Ordering::SeqCst);
        let err = store.insert(profile("D")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.delete(a.id).await.is_err());
        assert!(store.list().await.is_empty());

        store.backend.fail_reads.store(false, Ordering::SeqCst);
        assert_eq!(store.list().await, vec![a, b, c]);
    }
}
