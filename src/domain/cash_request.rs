//! Cash requests (advance/petty cash) and their line items.

use super::{Amount, Approvable, DisplayNumberFormat, Entity, Labeled, RecordId, Review, Sort};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashRequestStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
    Paid,
}

/// Request header. `total_amount` is the sum of its items once recalculated.
///
/// `request_number` is `CR-NNN`, counted within the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRequest {
    pub request_number: String,
    pub project_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<RecordId>,
    pub request_date: NaiveDate,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub total_amount: Amount,
    #[serde(default)]
    pub status: CashRequestStatus,
    #[serde(flatten)]
    pub review: Review,
}

impl CashRequest {
    pub fn number_format() -> DisplayNumberFormat {
        DisplayNumberFormat::new("CR-", 3)
    }

    pub fn new(project_id: RecordId, request_date: NaiveDate, purpose: impl Into<String>) -> Self {
        Self {
            request_number: String::new(),
            project_id,
            employee_id: None,
            request_date,
            purpose: purpose.into(),
            total_amount: Amount::ZERO,
            status: CashRequestStatus::Draft,
            review: Review::default(),
        }
    }
}

impl Entity for CashRequest {
    const COLLECTION: &'static str = "cash_requests";
    const SEARCH_FIELDS: &'static [&'static str] = &["requestNumber", "purpose"];
    const DEFAULT_SORT: Option<Sort> = Some(Sort::desc("requestDate"));
}

impl Approvable for CashRequest {
    type Status = CashRequestStatus;

    const APPROVED: CashRequestStatus = CashRequestStatus::Approved;
    const REJECTED: CashRequestStatus = CashRequestStatus::Rejected;
}

impl Labeled for CashRequest {
    fn label(&self) -> String {
        self.request_number.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRequestItem {
    pub cash_request_id: RecordId,
    pub description: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_line: Option<String>,
}

impl CashRequestItem {
    /// Item not yet attached to a header; workflows fill in the header id.
    pub fn detached(description: impl Into<String>, amount: Amount) -> Self {
        Self {
            cash_request_id: RecordId::new(0),
            description: description.into(),
            amount,
            budget_line: None,
        }
    }
}

impl Entity for CashRequestItem {
    const COLLECTION: &'static str = "cash_request_items";
    const SEARCH_FIELDS: &'static [&'static str] = &["description", "budgetLine"];
}
