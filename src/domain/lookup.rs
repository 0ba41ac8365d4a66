//! In-memory foreign-key resolution.
//!
//! References are stored as plain ids and resolved at read time against an
//! already-fetched collection. Dangling or absent references resolve to
//! [`UNKNOWN_LABEL`].

use super::{Record, RecordId};
use std::collections::HashMap;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Human-facing label for a record (name, code, or composite).
pub trait Labeled {
    fn label(&self) -> String;
}

/// Resolve `id` against `records`.
pub fn resolve_label<T: Labeled>(records: &[Record<T>], id: Option<RecordId>) -> String {
    id.and_then(|id| records.iter().find(|r| r.id == id))
        .map(|r| r.data.label())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// Precomputed id → label map for resolving many references at once.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    labels: HashMap<RecordId, String>,
}

impl LabelIndex {
    pub fn from_records<T: Labeled>(records: &[Record<T>]) -> Self {
        Self {
            labels: records.iter().map(|r| (r.id, r.data.label())).collect(),
        }
    }

    pub fn resolve(&self, id: Option<RecordId>) -> &str {
        id.and_then(|id| self.labels.get(&id))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
