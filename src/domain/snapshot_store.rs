//! Durable, newest-first version history of an opaque payload.
//!
//! [`SnapshotStore`] keeps the full snapshot list in memory and mirrors it
//! to one key of a [`KeyValueStorage`] backend. Every mutation builds the
//! next list off to the side, persists it as a whole, and only then adopts
//! it, so a rejected write leaves both copies unchanged.
//!
//! # Invariants
//!
//! - The list is never empty after [`SnapshotStore::initialize`].
//! - Index 0 is the newest snapshot and is the "current" one.
//! - Ids strictly increase and are never reused. The head always carries
//!   the largest id and cannot be deleted, so the next id is derived from
//!   the maximum present.

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::snapshot::{Snapshot, SnapshotExport, SnapshotId};
use crate::error::AdminError;
use crate::persistence::{KeyValueStorage, StorageError};

/// Outcome of [`SnapshotStore::restore`].
#[derive(Debug, Clone)]
pub struct Restored<T> {
    /// Copy of the restored data; the caller makes it the live state.
    pub data: T,
    /// The new head snapshot recording the restore.
    pub recorded: Snapshot<T>,
}

/// Version history persisted under a single storage key.
#[derive(Debug)]
pub struct SnapshotStore<T, S> {
    storage: S,
    key: String,
    snapshots: Vec<Snapshot<T>>,
}

impl<T, S> SnapshotStore<T, S>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync,
    S: KeyValueStorage,
{
    /// Loads the persisted list under `key`, or seeds and persists a single
    /// snapshot wrapping `initial` when nothing usable is stored.
    ///
    /// An existing non-empty list is adopted verbatim; calling this twice
    /// over the same storage never produces a second seed.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::StorageFailure`] if the backend cannot be read,
    /// the stored list cannot be decoded, or the seed cannot be written.
    pub async fn initialize(
        storage: S,
        key: impl Into<String>,
        initial: &T,
    ) -> Result<Self, AdminError> {
        let key = key.into();
        let mut store = Self {
            storage,
            key,
            snapshots: Vec::new(),
        };

        if let Some(raw) = store.storage.get(&store.key).await? {
            let snapshots: Vec<Snapshot<T>> =
                serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                    key: store.key.clone(),
                    reason: e.to_string(),
                })?;
            if !snapshots.is_empty() {
                tracing::info!(
                    key = %store.key,
                    versions = snapshots.len(),
                    "loaded version history"
                );
                store.snapshots = snapshots;
                return Ok(store);
            }
            tracing::warn!(key = %store.key, "stored version history is empty, reseeding");
        }

        let seed = Snapshot::new(
            SnapshotId::FIRST,
            "Initial portfolio version".to_string(),
            initial.clone(),
            vec!["Portfolio created".to_string()],
        );
        store.commit(vec![seed]).await?;
        tracing::info!(key = %store.key, "seeded version history");
        Ok(store)
    }

    /// Records a new snapshot of `current` at the head of the list.
    ///
    /// A blank or missing `description` becomes `Manual save - <date>`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::StorageFailure`] if the list cannot be
    /// persisted; the in-memory list is left unchanged in that case.
    pub async fn save(
        &mut self,
        current: &T,
        description: Option<&str>,
    ) -> Result<Snapshot<T>, AdminError> {
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map_or_else(
                || format!("Manual save - {}", Utc::now().format("%Y-%m-%d")),
                str::to_string,
            );
        let snapshot = Snapshot::new(
            self.next_id(),
            description,
            current.clone(),
            vec!["Manual save point created".to_string()],
        );
        self.prepend(snapshot.clone()).await?;
        tracing::info!(id = %snapshot.id, "snapshot saved");
        Ok(snapshot)
    }

    /// Restores snapshot `id`: records a new head snapshot carrying the same
    /// data and returns a copy of that data for the caller to make live.
    ///
    /// No history is discarded; the restore is itself a save.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::SnapshotNotFound`] if `id` is absent, or
    /// [`AdminError::StorageFailure`] if the list cannot be persisted.
    pub async fn restore(&mut self, id: &SnapshotId) -> Result<Restored<T>, AdminError> {
        let data = self.get(id)?.data.clone();
        let recorded = Snapshot::new(
            self.next_id(),
            format!("Restored from {id}"),
            data.clone(),
            vec![format!("Restored from version {id}")],
        );
        self.prepend(recorded.clone()).await?;
        tracing::info!(id = %recorded.id, source = %id, "snapshot restored");
        Ok(Restored { data, recorded })
    }

    /// Deletes snapshot `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::SnapshotNotFound`] if `id` is absent,
    /// [`AdminError::InvalidOperation`] if `id` is the current snapshot or
    /// the only one left, or [`AdminError::StorageFailure`] if the list
    /// cannot be persisted.
    pub async fn delete(&mut self, id: &SnapshotId) -> Result<(), AdminError> {
        let position = self
            .snapshots
            .iter()
            .position(|s| s.id == *id)
            .ok_or_else(|| AdminError::SnapshotNotFound(id.to_string()))?;
        if position == 0 {
            return Err(AdminError::InvalidOperation(format!(
                "cannot delete the current snapshot {id}"
            )));
        }
        if self.snapshots.len() <= 1 {
            return Err(AdminError::InvalidOperation(format!(
                "cannot delete {id}: it is the last remaining snapshot"
            )));
        }

        let next: Vec<Snapshot<T>> = self
            .snapshots
            .iter()
            .filter(|s| s.id != *id)
            .cloned()
            .collect();
        self.commit(next).await?;
        tracing::info!(%id, "snapshot deleted");
        Ok(())
    }

    /// Serializes the data of snapshot `id` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::SnapshotNotFound`] if `id` is absent, or
    /// [`AdminError::Serialization`] if the data cannot be encoded.
    pub fn export(&self, id: &SnapshotId) -> Result<SnapshotExport, AdminError> {
        let snapshot = self.get(id)?;
        let body = serde_json::to_string_pretty(&snapshot.data)?;
        Ok(SnapshotExport {
            file_name: format!("portfolio-{id}.json"),
            content_type: "application/json",
            body,
        })
    }

    /// Returns the snapshot with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::SnapshotNotFound`] if `id` is absent.
    pub fn get(&self, id: &SnapshotId) -> Result<&Snapshot<T>, AdminError> {
        self.snapshots
            .iter()
            .find(|s| s.id == *id)
            .ok_or_else(|| AdminError::SnapshotNotFound(id.to_string()))
    }
}

impl<T, S> SnapshotStore<T, S>
where
    T: Clone + Serialize + Send + Sync,
    S: KeyValueStorage,
{
    /// Snapshots in newest-first order.
    #[must_use]
    pub fn list(&self) -> &[Snapshot<T>] {
        &self.snapshots
    }

    /// The newest snapshot.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot<T>> {
        self.snapshots.first()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false` once initialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Storage key the list is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn next_id(&self) -> SnapshotId {
        self.snapshots
            .iter()
            .map(|s| s.id)
            .max()
            .map_or(SnapshotId::FIRST, SnapshotId::next)
    }

    async fn prepend(&mut self, snapshot: Snapshot<T>) -> Result<(), AdminError> {
        let mut next = Vec::with_capacity(self.snapshots.len() + 1);
        next.push(snapshot);
        next.extend(self.snapshots.iter().cloned());
        self.commit(next).await
    }

    /// Persists `next` and adopts it only if the write succeeded.
    async fn commit(&mut self, next: Vec<Snapshot<T>>) -> Result<(), AdminError> {
        let encoded = serde_json::to_string(&next)?;
        self.storage.set(&self.key, &encoded).await?;
        self.snapshots = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use serde::Deserialize;

    const KEY: &str = "portfolioVersions";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        skills: Vec<String>,
    }

    fn doc(name: &str) -> Doc {
        Doc {
            name: name.to_string(),
            skills: vec!["rust".to_string()],
        }
    }

    async fn store_over(storage: MemoryStorage, initial: &Doc) -> SnapshotStore<Doc, MemoryStorage> {
        let Ok(store) = SnapshotStore::initialize(storage, KEY, initial).await else {
            panic!("initialize failed");
        };
        store
    }

    fn ids(store: &SnapshotStore<Doc, MemoryStorage>) -> Vec<String> {
        store.list().iter().map(|s| s.id.to_string()).collect()
    }

    #[tokio::test]
    async fn initialize_seeds_once() {
        let storage = MemoryStorage::new();
        let first = store_over(storage.clone(), &doc("seed")).await;
        assert_eq!(ids(&first), vec!["v1.0.0"]);

        let second = store_over(storage.clone(), &doc("different")).await;
        assert_eq!(second.len(), 1);
        let Some(current) = second.current() else {
            panic!("expected a current snapshot");
        };
        assert_eq!(current.data, doc("seed"));
        assert_eq!(current.description, "Initial portfolio version");
    }

    #[tokio::test]
    async fn initialize_adopts_existing_list_verbatim() {
        let storage = MemoryStorage::new();
        let mut store = store_over(storage.clone(), &doc("seed")).await;
        assert!(store.save(&doc("two"), Some("edit")).await.is_ok());

        let reopened = store_over(storage, &doc("ignored")).await;
        assert_eq!(ids(&reopened), vec!["v2.0.0", "v1.0.0"]);
        assert_eq!(reopened.list(), store.list());
    }

    #[tokio::test]
    async fn initialize_reports_corrupt_list() {
        let storage = MemoryStorage::new();
        assert!(storage.set(KEY, "{oops").await.is_ok());
        let result = SnapshotStore::<Doc, _>::initialize(storage, KEY, &doc("seed")).await;
        assert!(matches!(
            result,
            Err(AdminError::StorageFailure(StorageError::Corrupt { .. }))
        ));
    }

    #[tokio::test]
    async fn save_copies_are_isolated() {
        let mut live = doc("seed");
        let mut store = store_over(MemoryStorage::new(), &live).await;

        let Ok(saved) = store.save(&live, None).await else {
            panic!("save failed");
        };
        live.name = "mutated".to_string();
        live.skills.push("go".to_string());

        assert_eq!(saved.data, doc("seed"));
        let Ok(stored) = store.get(&saved.id) else {
            panic!("saved snapshot missing");
        };
        assert_eq!(stored.data, doc("seed"));
        assert!(stored.description.starts_with("Manual save - "));
        assert_eq!(stored.changes, vec!["Manual save point created"]);
    }

    #[tokio::test]
    async fn ids_are_monotonic_across_deletes_and_reloads() {
        let storage = MemoryStorage::new();
        let mut store = store_over(storage.clone(), &doc("seed")).await;
        assert!(store.save(&doc("a"), None).await.is_ok());
        assert!(store.save(&doc("b"), None).await.is_ok());
        assert!(store.delete(&SnapshotId::from_sequence(2)).await.is_ok());

        let Ok(next) = store.save(&doc("c"), None).await else {
            panic!("save failed");
        };
        assert_eq!(next.id.to_string(), "v4.0.0");

        let mut reopened = store_over(storage, &doc("seed")).await;
        let Ok(after_reload) = reopened.save(&doc("d"), None).await else {
            panic!("save failed");
        };
        assert_eq!(after_reload.id.to_string(), "v5.0.0");
    }

    #[tokio::test]
    async fn restore_appends_and_returns_data() {
        let mut store = store_over(MemoryStorage::new(), &doc("seed")).await;
        assert!(store.save(&doc("edited"), Some("edit A")).await.is_ok());
        let before = store.len();

        let Ok(restored) = store.restore(&SnapshotId::FIRST).await else {
            panic!("restore failed");
        };
        assert_eq!(restored.data, doc("seed"));
        assert_eq!(store.len(), before + 1);
        let Some(head) = store.current() else {
            panic!("expected head");
        };
        assert_eq!(head.id, restored.recorded.id);
        assert_eq!(head.data, doc("seed"));
        assert_eq!(head.description, "Restored from v1.0.0");
    }

    #[tokio::test]
    async fn restore_unknown_is_not_found() {
        let mut store = store_over(MemoryStorage::new(), &doc("seed")).await;
        let result = store.restore(&SnapshotId::from_sequence(9)).await;
        assert!(matches!(result, Err(AdminError::SnapshotNotFound(id)) if id == "v9.0.0"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_guards_current_and_last() {
        let mut store = store_over(MemoryStorage::new(), &doc("seed")).await;
        let result = store.delete(&SnapshotId::FIRST).await;
        assert!(matches!(result, Err(AdminError::InvalidOperation(_))));

        assert!(store.save(&doc("two"), None).await.is_ok());
        let result = store.delete(&SnapshotId::from_sequence(2)).await;
        assert!(matches!(result, Err(AdminError::InvalidOperation(_))));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let mut store = store_over(MemoryStorage::new(), &doc("seed")).await;
        assert!(store.save(&doc("two"), None).await.is_ok());
        let result = store.delete(&SnapshotId::from_sequence(7)).await;
        assert!(matches!(result, Err(AdminError::SnapshotNotFound(_))));
    }

    #[tokio::test]
    async fn export_round_trips_data() {
        let mut store = store_over(MemoryStorage::new(), &doc("seed")).await;
        assert!(store.save(&doc("two"), None).await.is_ok());

        let Ok(export) = store.export(&SnapshotId::FIRST) else {
            panic!("export failed");
        };
        assert_eq!(export.file_name, "portfolio-v1.0.0.json");
        assert_eq!(export.content_type, "application/json");

        let Ok(decoded) = serde_json::from_str::<Doc>(&export.body) else {
            panic!("export is not valid JSON");
        };
        let Ok(original) = store.get(&SnapshotId::FIRST) else {
            panic!("snapshot missing");
        };
        assert_eq!(decoded, original.data);
    }

    #[tokio::test]
    async fn failed_persist_leaves_list_unchanged() {
        let mut store = store_over(MemoryStorage::with_quota(800), &doc("seed")).await;
        let big = Doc {
            name: "x".repeat(2_000),
            skills: Vec::new(),
        };

        let result = store.save(&big, None).await;
        assert!(matches!(
            result,
            Err(AdminError::StorageFailure(StorageError::QuotaExceeded { .. }))
        ));
        assert_eq!(ids(&store), vec!["v1.0.0"]);

        // The id that failed to persist is handed out again.
        let Ok(next) = store.save(&doc("small"), None).await else {
            panic!("save failed");
        };
        assert_eq!(next.id.to_string(), "v2.0.0");
    }

    #[tokio::test]
    async fn persisted_list_matches_memory() {
        let storage = MemoryStorage::new();
        let mut store = store_over(storage.clone(), &doc("seed")).await;
        assert!(store.save(&doc("two"), None).await.is_ok());

        let Ok(Some(raw)) = storage.get(KEY).await else {
            panic!("nothing persisted");
        };
        let Ok(persisted) = serde_json::from_str::<Vec<Snapshot<Doc>>>(&raw) else {
            panic!("persisted list unreadable");
        };
        assert_eq!(persisted.as_slice(), store.list());
    }

    #[tokio::test]
    async fn full_scenario() {
        let seed = doc("seed");
        let d2 = doc("d2");
        let mut store = store_over(MemoryStorage::new(), &seed).await;
        assert_eq!(ids(&store), vec!["v1.0.0"]);

        let Ok(v2) = store.save(&d2, Some("edit A")).await else {
            panic!("save failed");
        };
        assert_eq!(ids(&store), vec!["v2.0.0", "v1.0.0"]);
        assert_eq!(v2.data, d2);
        assert_eq!(v2.description, "edit A");

        let Ok(restored) = store.restore(&SnapshotId::FIRST).await else {
            panic!("restore failed");
        };
        assert_eq!(restored.data, seed);
        assert_eq!(ids(&store), vec!["v3.0.0", "v2.0.0", "v1.0.0"]);
        assert_eq!(restored.recorded.data, seed);

        assert!(store.delete(&v2.id).await.is_ok());
        assert_eq!(ids(&store), vec!["v3.0.0", "v1.0.0"]);

        let result = store.delete(&restored.recorded.id).await;
        assert!(matches!(result, Err(AdminError::InvalidOperation(_))));
    }
}
