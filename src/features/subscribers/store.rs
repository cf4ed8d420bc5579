//! JSON-file subscriber store
//!
//! The whole record set lives in one JSON document. Writes go to a uniquely
//! named sibling file which is then renamed over the document, so a reader
//! sees either the old set or the new one. The in-process [`SubscriberStore`]
//! keeps the set in memory and funnels every read-modify-write cycle through
//! a single persist lock.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Keep unsaved changes in memory and retry on the next write
//! - 1.0.0: Initial release with atomic temp-file replace

use super::record::{SubscriberMap, SubscriberRecord, UserId};
use crate::core::PersistenceError;
use log::{debug, error, info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Read the subscriber document. Missing or unreadable documents yield an empty set.
pub async fn load(path: &Path) -> SubscriberMap {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No subscriber file at {}, starting empty", path.display());
            return SubscriberMap::new();
        }
        Err(e) => {
            warn!(
                "Failed to read subscriber file {}: {e}. Starting empty",
                path.display()
            );
            return SubscriberMap::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(records) => records,
        Err(e) => {
            warn!(
                "Subscriber file {} is not valid JSON: {e}. Starting empty",
                path.display()
            );
            SubscriberMap::new()
        }
    }
}

/// Overwrite the subscriber document with `records`
pub async fn save(path: &Path, records: &SubscriberMap) -> Result<(), PersistenceError> {
    let payload = serde_json::to_vec_pretty(records)?;

    let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    if let Err(source) = tokio::fs::write(&temp_path, payload).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(PersistenceError::Write {
            path: temp_path,
            source,
        });
    }

    if let Err(source) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(PersistenceError::Rename {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Result of a read-modify-write cycle.
///
/// The mutation is applied in memory regardless of `persisted`; a failed
/// write is retried by the next cycle that writes the full set again.
#[derive(Debug)]
pub struct UpdateOutcome<T> {
    pub value: T,
    pub persisted: Result<(), PersistenceError>,
}

/// Shared handle to the subscriber record set
pub struct SubscriberStore {
    path: PathBuf,
    records: RwLock<SubscriberMap>,
    persist_lock: Mutex<()>,
}

impl SubscriberStore {
    /// Load the document at `path` into memory
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load(&path).await;
        info!(
            "📂 Loaded {} subscriber records from {}",
            records.len(),
            path.display()
        );
        Self {
            path,
            records: RwLock::new(records),
            persist_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consistent copy of every record, for the reminder broadcast
    pub async fn snapshot(&self) -> SubscriberMap {
        self.records.read().await.clone()
    }

    pub async fn get(&self, user: &UserId) -> Option<SubscriberRecord> {
        self.records.read().await.get(user).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Apply `mutate` to the record set and persist the result.
    ///
    /// Cycles are serialized, so concurrent updates never overwrite each other.
    pub async fn update<T, F>(&self, mutate: F) -> UpdateOutcome<T>
    where
        F: FnOnce(&mut SubscriberMap) -> T,
    {
        let _persist = self.persist_lock.lock().await;

        let (value, snapshot) = {
            let mut records = self.records.write().await;
            let value = mutate(&mut records);
            (value, records.clone())
        };

        let persisted = self.write(&snapshot).await;
        UpdateOutcome { value, persisted }
    }

    /// Write the current in-memory set without changing it
    pub async fn flush(&self) -> Result<(), PersistenceError> {
        let _persist = self.persist_lock.lock().await;
        let snapshot = self.snapshot().await;
        self.write(&snapshot).await
    }

    async fn write(&self, snapshot: &SubscriberMap) -> Result<(), PersistenceError> {
        match save(&self.path, snapshot).await {
            Ok(()) => {
                debug!(
                    "Persisted {} subscriber records to {}",
                    snapshot.len(),
                    self.path.display()
                );
                Ok(())
            }
            Err(e) => {
                error!("❌ Subscriber records not persisted: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::subscribers::record::RecipientHandle;
    use std::sync::Arc;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("waterbot-store-{}", Uuid::new_v4().simple()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample() -> SubscriberMap {
        let mut map = SubscriberMap::new();
        map.insert(
            UserId::new("a"),
            SubscriberRecord::enabled(RecipientHandle::new("100"), 2.1),
        );
        map.insert(
            UserId::new("b"),
            SubscriberRecord::disabled(RecipientHandle::new("200"), 2.0),
        );
        map
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = scratch_dir();
        let records = load(&dir.join("nope.json")).await;
        assert!(records.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let dir = scratch_dir();
        let path = dir.join("users.json");
        std::fs::write(&path, b"{ not json").unwrap();
        assert!(load(&path).await.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = scratch_dir();
        let path = dir.join("users.json");

        save(&path, &sample()).await.unwrap();
        let first = load(&path).await;
        assert_eq!(first, sample());

        save(&path, &first).await.unwrap();
        assert_eq!(load(&path).await, first);

        // No temp files left behind
        let leftovers: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_set() {
        let dir = scratch_dir();
        let path = dir.join("users.json");

        save(&path, &sample()).await.unwrap();
        let mut smaller = SubscriberMap::new();
        smaller.insert(
            UserId::new("c"),
            SubscriberRecord::enabled(RecipientHandle::new("300"), 1.8),
        );
        save(&path, &smaller).await.unwrap();

        assert_eq!(load(&path).await, smaller);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let dir = scratch_dir();
        let path = dir.join("users.json");
        let store = Arc::new(SubscriberStore::open(&path).await);

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update(|records| {
                        records.insert(
                            UserId::new(format!("user{i}")),
                            SubscriberRecord::enabled(RecipientHandle::new(format!("{i}")), 2.0),
                        );
                    })
                    .await
                    .persisted
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len().await, 20);
        assert_eq!(load(&path).await.len(), 20);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_failed_write_is_retried_by_next_cycle() {
        let dir = scratch_dir();
        let missing_dir = dir.join("not-yet");
        let path = missing_dir.join("users.json");
        let store = SubscriberStore::open(&path).await;

        let outcome = store
            .update(|records| {
                records.insert(
                    UserId::new("a"),
                    SubscriberRecord::enabled(RecipientHandle::new("100"), 2.1),
                );
                "done"
            })
            .await;
        assert_eq!(outcome.value, "done");
        assert!(outcome.persisted.is_err());
        // Change survives in memory
        assert!(store.get(&UserId::new("a")).await.is_some());

        std::fs::create_dir_all(&missing_dir).unwrap();
        store
            .update(|records| {
                records.insert(
                    UserId::new("b"),
                    SubscriberRecord::disabled(RecipientHandle::new("200"), 2.0),
                );
            })
            .await
            .persisted
            .unwrap();

        let on_disk = load(&path).await;
        assert!(on_disk.contains_key(&UserId::new("a")));
        assert!(on_disk.contains_key(&UserId::new("b")));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_open_reads_existing_document() {
        let dir = scratch_dir();
        let path = dir.join("users.json");
        save(&path, &sample()).await.unwrap();

        let store = SubscriberStore::open(&path).await;
        assert_eq!(store.snapshot().await, sample());
        store.flush().await.unwrap();
        assert_eq!(load(&path).await, sample());
        let _ = std::fs::remove_dir_all(dir);
    }
}
