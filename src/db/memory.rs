//! In-memory store for tests and dry runs.

use super::Store;
use crate::domain::record::ID_FIELD;
use crate::domain::{Document, RecordId};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct MemoryCollection {
    last_id: i64,
    records: BTreeMap<i64, Document>,
}

/// Store kept entirely in process memory.
///
/// `set_available(false)` makes every call fail with
/// [`StoreError::Unavailable`], mimicking a disabled or full backing store.
#[derive(Debug)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, MemoryCollection>>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store is switched off".to_string(),
            ))
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, MemoryCollection>>> {
        self.ensure_available()?;
        self.collections
            .read()
            .map_err(|e| StoreError::Unavailable(format!("store lock poisoned: {}", e)))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, MemoryCollection>>> {
        self.ensure_available()?;
        self.collections
            .write()
            .map_err(|e| StoreError::Unavailable(format!("store lock poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn scan(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|c| c.records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: RecordId) -> StoreResult<Option<Document>> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|c| c.records.get(&id.as_i64()))
            .cloned())
    }

    async fn insert(&self, collection: &str, mut doc: Document) -> StoreResult<RecordId> {
        let mut collections = self.write()?;
        let entry = collections.entry(collection.to_string()).or_default();
        entry.last_id += 1;
        let id = entry.last_id;
        doc.insert(ID_FIELD.to_string(), Value::from(id));
        entry.records.insert(id, doc);
        Ok(RecordId::new(id))
    }

    async fn put(&self, collection: &str, id: RecordId, mut doc: Document) -> StoreResult<()> {
        let mut collections = self.write()?;
        let entry = collections.entry(collection.to_string()).or_default();
        entry.last_id = entry.last_id.max(id.as_i64());
        doc.insert(ID_FIELD.to_string(), Value::from(id));
        entry.records.insert(id.as_i64(), doc);
        Ok(())
    }

    async fn remove(&self, collection: &str, id: RecordId) -> StoreResult<bool> {
        let mut collections = self.write()?;
        Ok(collections
            .get_mut(collection)
            .and_then(|c| c.records.remove(&id.as_i64()))
            .is_some())
    }

    async fn collections(&self) -> StoreResult<Vec<String>> {
        let collections = self.read()?;
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn last_id(&self, collection: &str) -> StoreResult<i64> {
        let collections = self.read()?;
        Ok(collections.get(collection).map_or(0, |c| c.last_id))
    }

    async fn advance_counter(&self, collection: &str, last_id: i64) -> StoreResult<()> {
        let mut collections = self.write()?;
        let entry = collections.entry(collection.to_string()).or_default();
        entry.last_id = entry.last_id.max(last_id);
        Ok(())
    }
}
