//! Approve and reject for any reviewable entity.

use super::Repository;
use crate::domain::{ApprovalMeta, Approvable, Record, RecordId};
use crate::error::StoreResult;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

impl<T: Approvable> Repository<T> {
    /// Mark the record approved and record who approved it.
    ///
    /// # Errors
    /// [`StoreError::NotFound`](crate::error::StoreError::NotFound) if `id` does not exist.
    pub async fn approve(&self, id: RecordId, meta: &ApprovalMeta) -> StoreResult<Record<T>> {
        self.review(id, &T::APPROVED, meta).await
    }

    /// Mark the record rejected and record who rejected it.
    pub async fn reject(&self, id: RecordId, meta: &ApprovalMeta) -> StoreResult<Record<T>> {
        self.review(id, &T::REJECTED, meta).await
    }

    async fn review<S>(&self, id: RecordId, status: &S, meta: &ApprovalMeta) -> StoreResult<Record<T>>
    where
        S: Serialize + Sync,
    {
        let status = serde_json::to_value(status)?;
        let patch = json!({
            "status": status,
            "reviewedBy": meta.reviewer,
            "reviewedAt": Utc::now(),
            "reviewComments": meta.comments.clone().map_or(Value::Null, Value::String),
        });
        let record = self.update(id, &patch).await?;
        info!(
            collection = T::COLLECTION,
            id = id.as_i64(),
            status = %status,
            reviewer = %meta.reviewer,
            "Recorded review decision"
        );
        Ok(record)
    }
}
