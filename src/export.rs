//! CSV export of stored collections.

use crate::db::Store;
use crate::domain::record::{to_document, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};
use crate::domain::{Document, Entity, Record};
use crate::error::{StoreError, StoreResult};
use serde_json::Value;
use std::collections::BTreeSet;

const LEADING_COLUMNS: [&str; 3] = [ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD];

/// Header row: the audit columns, then every other field name, sorted.
pub fn columns(docs: &[Document]) -> Vec<String> {
    let rest: BTreeSet<&str> = docs
        .iter()
        .flat_map(|doc| doc.keys().map(String::as_str))
        .filter(|key| !LEADING_COLUMNS.contains(key))
        .collect();
    LEADING_COLUMNS
        .iter()
        .copied()
        .chain(rest)
        .map(str::to_string)
        .collect()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Render documents as CSV with a header row.
///
/// Missing and null fields become empty cells; nested values are written as
/// compact JSON.
pub fn documents_to_csv(docs: &[Document]) -> StoreResult<String> {
    let columns = columns(docs);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for doc in docs {
        writer.write_record(columns.iter().map(|c| cell(doc.get(c))))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Export(e.to_string()))
}

pub fn records_to_csv<T: Entity>(records: &[Record<T>]) -> StoreResult<String> {
    let docs = records
        .iter()
        .map(|r| to_document(r).map_err(|m| StoreError::invalid_document(T::COLLECTION, m)))
        .collect::<StoreResult<Vec<_>>>()?;
    documents_to_csv(&docs)
}

/// Every document of `collection`, in id order, as CSV.
pub async fn export_collection(store: &dyn Store, collection: &str) -> StoreResult<String> {
    let docs = store.scan(collection).await?;
    tracing::info!(collection, rows = docs.len(), "Exporting collection");
    documents_to_csv(&docs)
}
