//! Storage handle abstraction.

use crate::domain::{Document, RecordId};
use crate::error::StoreResult;
use async_trait::async_trait;
use std::fmt;

/// A collection-oriented document store.
///
/// Every method runs as its own unit of work scoped to one collection; there is
/// no cross-collection atomicity. Ids come from a per-collection counter that
/// only moves forward, so a deleted id is never handed out again.
#[async_trait]
pub trait Store: Send + Sync + fmt::Debug {
    /// All documents in a collection, in id (insertion) order.
    ///
    /// An unknown collection is simply empty.
    async fn scan(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// One document, or `None` if `id` does not exist.
    async fn get(&self, collection: &str, id: RecordId) -> StoreResult<Option<Document>>;

    /// Assign the next id, write it into the document's `id` field, and store it.
    async fn insert(&self, collection: &str, doc: Document) -> StoreResult<RecordId>;

    /// Write a document under an explicit id, replacing any existing one.
    ///
    /// The collection's counter advances to at least `id`.
    async fn put(&self, collection: &str, id: RecordId, doc: Document) -> StoreResult<()>;

    /// Remove a document. Returns whether it existed.
    async fn remove(&self, collection: &str, id: RecordId) -> StoreResult<bool>;

    /// Names of collections that have ever held a document.
    async fn collections(&self) -> StoreResult<Vec<String>>;

    /// Highest id ever handed out in a collection, 0 if none.
    async fn last_id(&self, collection: &str) -> StoreResult<i64>;

    /// Move a collection's counter forward to at least `last_id`. Never lowers it.
    async fn advance_counter(&self, collection: &str, last_id: i64) -> StoreResult<()>;
}
