use crate::domain::RecordId;
use thiserror::Error;

/// Errors surfaced by stores and repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Not found: {collection} with id {id}")]
    NotFound {
        collection: String,
        id: RecordId,
    },
    #[error("Invalid document in {collection}: {message}")]
    InvalidDocument { collection: String, message: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Export error: {0}")]
    Export(String),
    #[error("Backup error: {0}")]
    Backup(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: RecordId) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id,
        }
    }

    pub fn invalid_document(collection: &str, message: impl Into<String>) -> Self {
        StoreError::InvalidDocument {
            collection: collection.to_string(),
            message: message.into(),
        }
    }

    /// True for the explicit "record does not exist" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Export(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::not_found("donors", RecordId::new(7));
        assert_eq!(err.to_string(), "Not found: donors with id 7");
        assert!(err.is_not_found());

        let err = StoreError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: quota exceeded");
        assert!(!err.is_not_found());

        let err = StoreError::invalid_document("projects", "patch must be an object");
        assert_eq!(
            err.to_string(),
            "Invalid document in projects: patch must be an object"
        );
    }
}
