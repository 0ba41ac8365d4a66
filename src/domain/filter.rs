//! Equality/search filters and display sorting over stored documents.

use super::record::{Document, Sort, SortOrder};
use serde_json::Value;
use std::cmp::Ordering;

/// Narrowing applied by `Repository::get_all`.
///
/// All equality conditions must hold; the search term, when present, must
/// appear (case-insensitively) in at least one of the entity's search fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    equals: Vec<(String, Value)>,
    search: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.equals.push((field.into(), value.into()));
        self
    }

    /// Case-insensitive substring search; blank terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        };
        self
    }

    pub fn is_empty(&self) -> bool {
        self.equals.is_empty() && self.search.is_none()
    }

    pub fn matches(&self, doc: &Document, search_fields: &[&str]) -> bool {
        let equal = self.equals.iter().all(|(field, expected)| match doc.get(field) {
            Some(actual) => values_equal(actual, expected),
            None => expected.is_null(),
        });
        if !equal {
            return false;
        }

        match &self.search {
            None => true,
            Some(term) => search_fields.iter().any(|field| {
                doc.get(*field)
                    .and_then(searchable_text)
                    .is_some_and(|text| text.to_lowercase().contains(term.as_str()))
            }),
        }
    }
}

fn searchable_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Loose equality: numbers compare numerically, and a number equals its
/// string form (form inputs hand ids over as strings).
pub fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match (n.as_f64(), s.trim().parse::<f64>()) {
                (Some(a), Ok(b)) => a == b,
                _ => false,
            }
        }
        _ => actual == expected,
    }
}

/// Stable sort by one field. Records missing the field sort last either way.
pub fn sort_documents(docs: &mut [Document], sort: Sort) {
    docs.sort_by(|a, b| {
        match (
            a.get(sort.field).filter(|v| !v.is_null()),
            b.get(sort.field).filter(|v| !v.is_null()),
        ) {
            (Some(x), Some(y)) => {
                let ord = compare_values(x, y);
                match sort.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
