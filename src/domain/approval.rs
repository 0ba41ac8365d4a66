//! Approve/reject bookkeeping shared by requests and orders.

use super::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who decided on a record, when, and why.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_comments: Option<String>,
}

/// Caller-supplied details for an approve or reject action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalMeta {
    pub reviewer: String,
    pub comments: Option<String>,
}

impl ApprovalMeta {
    pub fn new(reviewer: impl Into<String>) -> Self {
        Self {
            reviewer: reviewer.into(),
            comments: None,
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

/// Entities with an approve/reject action.
///
/// No transition rules apply: any status may be approved or rejected.
pub trait Approvable: Entity {
    type Status: Serialize + Send + Sync;

    const APPROVED: Self::Status;
    const REJECTED: Self::Status;
}
