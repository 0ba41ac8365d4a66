//! Stored record envelope and the per-entity contract.

use super::RecordId;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document: a flat field mapping.
pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Sort direction for display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Display sort on one document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub order: SortOrder,
}

impl Sort {
    pub const fn asc(field: &'static str) -> Self {
        Sort {
            field,
            order: SortOrder::Asc,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Sort {
            field,
            order: SortOrder::Desc,
        }
    }
}

/// A record type kept in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name in the store.
    const COLLECTION: &'static str;

    /// Fields matched case-insensitively by a `search` filter.
    const SEARCH_FIELDS: &'static [&'static str] = &[];

    /// Display ordering; `None` keeps insertion order.
    const DEFAULT_SORT: Option<Sort> = None;
}

/// A record as returned by a repository: data plus id and audit timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Entity> Record<T> {
    /// Decode a stored document.
    pub fn from_document(doc: Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(doc))
    }
}

impl<T> std::ops::Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// Serialize `value` as a field mapping, or explain why it is not one.
pub fn to_document<V: Serialize + ?Sized>(value: &V) -> Result<Document, String> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a field mapping, got {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
