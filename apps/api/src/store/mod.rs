//! Record Store — persistence seam for complaint records.
//!
//! `RecordStore` is the interface; `JsonFileStore` is the default backing:
//! one pretty-printed JSON array, read fully and rewritten fully on every
//! mutation. A writer lock serializes read-modify-write cycles so concurrent
//! appends and status updates cannot lose each other's writes.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::complaint::ComplaintRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persistence operations over the complaint collection.
///
/// `get_by_id` and `update_status` signal an unknown id (or an absent
/// backing file) through their return value, not through an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Assigns an id to the record, persists it, and returns the stored copy.
    async fn append(&self, record: ComplaintRecord) -> Result<ComplaintRecord, StoreError>;

    /// Every stored record; empty when nothing has been stored yet.
    async fn list_all(&self) -> Result<Vec<ComplaintRecord>, StoreError>;

    async fn get_by_id(&self, id: u64) -> Result<Option<ComplaintRecord>, StoreError>;

    /// Sets the student-facing status of one record.
    /// Returns `false` when no record has the given id.
    async fn update_status(&self, id: u64, new_status: &str) -> Result<bool, StoreError>;
}

/// Flat-file JSON store. Mutations take the writer lock for their entire
/// read-modify-write cycle; reads go straight to the file.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Complaint store backed by {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_records(&self) -> Result<Vec<ComplaintRecord>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_records(&self, records: &[ComplaintRecord]) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

/// Next id: millisecond-scaled, but strictly greater than every stored id.
/// Monotonic under the writer lock, so sequential appends never collide even
/// within one millisecond.
fn next_id(records: &[ComplaintRecord]) -> u64 {
    let seed = Utc::now().timestamp_millis() as u64;
    match records.iter().map(|r| r.id).max() {
        Some(max) if max >= seed => max + 1,
        _ => seed,
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn append(&self, mut record: ComplaintRecord) -> Result<ComplaintRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        record.id = next_id(&records);
        records.push(record.clone());
        self.write_records(&records).await?;
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ComplaintRecord>, StoreError> {
        self.read_records().await
    }

    async fn get_by_id(&self, id: u64) -> Result<Option<ComplaintRecord>, StoreError> {
        let records = self.read_records().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    async fn update_status(&self, id: u64, new_status: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        record.student_view.status = new_status.to_string();
        self.write_records(&records).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::complaint::{AdminView, ComplaintRecord, StudentView, STATUS_PENDING};
    use crate::taxonomy::{resolve_contacts, Department};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("complaints_store.json"))
    }

    fn make_record(text: &str) -> ComplaintRecord {
        let timestamp = Utc::now();
        let departments = vec![Department::Maintenance];
        ComplaintRecord {
            id: 0,
            student_view: StudentView {
                complaint: text.to_string(),
                timestamp,
                status: STATUS_PENDING.to_string(),
            },
            admin_view: AdminView {
                timestamp,
                severity: 3,
                summary: format!("summary of: {text}"),
                complaint: text.to_string(),
                departments: departments.clone(),
                contacts: resolve_contacts(&departments),
                suggestions: vec!["Wait for the maintenance visit.".to_string()],
                institute: "IIIT Nagpur".to_string(),
                officer_brief: "brief".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_list_all_on_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_and_update_on_missing_file_are_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.get_by_id(42).await.unwrap().is_none());
        assert!(!store.update_status(42, "Resolved").await.unwrap());
    }

    #[tokio::test]
    async fn test_append_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let stored = store.append(make_record("broken fan")).await.unwrap();
        assert!(stored.id > 0);

        let fetched = store.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_ids_are_strictly_increasing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let first = store.append(make_record("one")).await.unwrap();
        let second = store.append(make_record("two")).await.unwrap();
        let third = store.append(make_record("three")).await.unwrap();
        assert!(second.id > first.id);
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_update_status_changes_only_status() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let stored = store.append(make_record("broken fan")).await.unwrap();
        assert!(store.update_status(stored.id, "Resolved").await.unwrap());

        let fetched = store.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.student_view.status, "Resolved");
        assert_eq!(fetched.student_view.complaint, stored.student_view.complaint);
        assert_eq!(fetched.admin_view, stored.admin_view);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let stored = store.append(make_record("broken fan")).await.unwrap();
        let before = store.list_all().await.unwrap();

        assert!(!store.update_status(stored.id + 999, "Resolved").await.unwrap());
        assert_eq!(store.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_list_all_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(make_record("one")).await.unwrap();
        store.append(make_record("two")).await.unwrap();

        let first = store.list_all().await.unwrap();
        let second = store.list_all().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn test_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("complaints_store.json");

        let stored = {
            let store = JsonFileStore::new(&path);
            store.append(make_record("reopened")).await.unwrap()
        };

        let reopened = JsonFileStore::new(&path);
        let fetched = reopened.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_persisted() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(store_in(&dir));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append(make_record(&format!("complaint {i}"))).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 8);
        let mut ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8, "ids must be unique");
    }
}
