//! Generic per-entity repository.
//!
//! `Repository<T>` gives uniform CRUD over the collection named by
//! `T::COLLECTION`. Entity-specific helpers live in submodules as extra
//! `impl Repository<Entity>` blocks, organized by domain:
//! - `approval.rs` - approve/reject for approvable entities
//! - `cash_requests.rs` - request numbers, items, total recalculation
//! - `contracts.rs` - contract numbers, statistics, expiry
//! - `donors.rs` / `employees.rs` - lookups
//! - `procurement.rs` - PR/PO numbers and PR totals
//! - `projects.rs` - statistics, budget rollups, amendment numbers

mod approval;
mod cash_requests;
mod contracts;
mod donors;
mod employees;
mod procurement;
mod projects;

pub use contracts::ContractStatistics;
pub use projects::ProjectStatistics;

use super::Store;
use crate::domain::filter::sort_documents;
use crate::domain::primitives::stamp_after;
use crate::domain::record::{to_document, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};
use crate::domain::{Document, Entity, Filter, Record, RecordId};
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// CRUD over one entity's collection.
pub struct Repository<T> {
    store: Arc<dyn Store>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("collection", &T::COLLECTION)
            .finish()
    }
}

impl<T: Entity> Repository<T> {
    /// Create a repository over the given store handle.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Repository {
            store,
            _entity: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    /// Every record matching `filter`, in the entity's display order.
    ///
    /// An empty collection yields an empty vector. Documents that no longer
    /// decode as `T` are logged and skipped.
    pub async fn get_all(&self, filter: &Filter) -> StoreResult<Vec<Record<T>>> {
        let docs = self.documents(filter).await?;
        Ok(docs.into_iter().filter_map(decode_listed::<T>).collect())
    }

    /// Every record, unfiltered.
    pub async fn list(&self) -> StoreResult<Vec<Record<T>>> {
        self.get_all(&Filter::new()).await
    }

    pub async fn count(&self, filter: &Filter) -> StoreResult<usize> {
        Ok(self.documents(filter).await?.len())
    }

    /// The record with `id`, or `None`. A missing id is not an error.
    pub async fn get_by_id(&self, id: RecordId) -> StoreResult<Option<Record<T>>> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(doc) => decode::<T>(doc).map(Some),
            None => Ok(None),
        }
    }

    /// Store `data` under a fresh id with both audit timestamps set to now.
    ///
    /// No validation happens here; required fields are the caller's concern.
    pub async fn create(&self, data: &T) -> StoreResult<Record<T>> {
        let mut doc = to_document(data)
            .map_err(|message| StoreError::invalid_document(T::COLLECTION, message))?;
        doc.remove(ID_FIELD);

        let stamp = serde_json::to_value(Utc::now())?;
        doc.insert(CREATED_AT_FIELD.to_string(), stamp.clone());
        doc.insert(UPDATED_AT_FIELD.to_string(), stamp);

        let id = self.store.insert(T::COLLECTION, doc.clone()).await?;
        doc.insert(ID_FIELD.to_string(), id.into());

        debug!(collection = T::COLLECTION, id = id.as_i64(), "Created record");
        decode::<T>(doc)
    }

    /// Shallow-merge `patch` over the stored record and refresh `updatedAt`.
    ///
    /// Fields absent from `patch` are kept; `id` and `createdAt` in the patch
    /// are ignored. A merge that no longer decodes as `T` is refused and the
    /// stored record is left untouched.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if `id` does not exist.
    pub async fn update<P>(&self, id: RecordId, patch: &P) -> StoreResult<Record<T>>
    where
        P: Serialize + ?Sized + Sync,
    {
        let patch = to_document(patch)
            .map_err(|message| StoreError::invalid_document(T::COLLECTION, message))?;
        let mut doc = self
            .store
            .get(T::COLLECTION, id)
            .await?
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))?;

        let previous = doc
            .get(UPDATED_AT_FIELD)
            .cloned()
            .and_then(|v| serde_json::from_value::<DateTime<Utc>>(v).ok());

        for (key, value) in patch {
            if key == ID_FIELD || key == CREATED_AT_FIELD {
                continue;
            }
            doc.insert(key, value);
        }
        doc.insert(
            UPDATED_AT_FIELD.to_string(),
            serde_json::to_value(stamp_after(previous))?,
        );

        let record = decode::<T>(doc.clone())?;
        self.store.put(T::COLLECTION, id, doc).await?;

        debug!(collection = T::COLLECTION, id = id.as_i64(), "Updated record");
        Ok(record)
    }

    /// Remove the record. Deleting a missing id succeeds; nothing cascades.
    pub async fn delete(&self, id: RecordId) -> StoreResult<()> {
        let existed = self.store.remove(T::COLLECTION, id).await?;
        debug!(
            collection = T::COLLECTION,
            id = id.as_i64(),
            existed,
            "Deleted record"
        );
        Ok(())
    }

    /// Raw matching documents in display order.
    pub(crate) async fn documents(&self, filter: &Filter) -> StoreResult<Vec<Document>> {
        let mut docs = self.store.scan(T::COLLECTION).await?;
        if !filter.is_empty() {
            docs.retain(|doc| filter.matches(doc, T::SEARCH_FIELDS));
        }
        if let Some(sort) = T::DEFAULT_SORT {
            sort_documents(&mut docs, sort);
        }
        Ok(docs)
    }

    /// String values of `field` across records matching `filter`.
    pub(crate) async fn field_values(&self, filter: &Filter, field: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .store
            .scan(T::COLLECTION)
            .await?
            .iter()
            .filter(|doc| filter.matches(doc, T::SEARCH_FIELDS))
            .filter_map(|doc| doc.get(field).and_then(|v| v.as_str()).map(str::to_string))
            .collect())
    }
}

fn decode<T: Entity>(doc: Document) -> StoreResult<Record<T>> {
    Record::from_document(doc)
        .map_err(|e| StoreError::invalid_document(T::COLLECTION, e.to_string()))
}

fn decode_listed<T: Entity>(doc: Document) -> Option<Record<T>> {
    let id = doc.get(ID_FIELD).and_then(RecordId::from_value);
    match Record::from_document(doc) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(
                collection = T::COLLECTION,
                id = ?id,
                error = %e,
                "Skipping document that does not decode"
            );
            None
        }
    }
}
