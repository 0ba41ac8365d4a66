//! Purchase requests, their line items, and purchase orders.

use super::{
    Amount, Approvable, DisplayNumberFormat, Entity, Labeled, RecordId, Review, Sort,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRequestStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

/// A request to buy goods or services against a project budget.
///
/// `pr_number` is `PR-<year>-NNN`, counted within the request year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub pr_number: String,
    pub project_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<RecordId>,
    pub request_date: NaiveDate,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub status: PurchaseRequestStatus,
    #[serde(flatten)]
    pub review: Review,
}

impl PurchaseRequest {
    pub fn number_format(request_date: NaiveDate) -> DisplayNumberFormat {
        DisplayNumberFormat::new(format!("PR-{}-", request_date.year()), 3)
    }
}

impl Entity for PurchaseRequest {
    const COLLECTION: &'static str = "purchase_requests";
    const SEARCH_FIELDS: &'static [&'static str] = &["prNumber", "purpose"];
    const DEFAULT_SORT: Option<Sort> = Some(Sort::desc("requestDate"));
}

impl Approvable for PurchaseRequest {
    type Status = PurchaseRequestStatus;

    const APPROVED: PurchaseRequestStatus = PurchaseRequestStatus::Approved;
    const REJECTED: PurchaseRequestStatus = PurchaseRequestStatus::Rejected;
}

impl Labeled for PurchaseRequest {
    fn label(&self) -> String {
        self.pr_number.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequestItem {
    pub purchase_request_id: RecordId,
    pub description: String,
    pub quantity: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub unit_price: Amount,
}

impl PurchaseRequestItem {
    pub fn line_total(&self) -> Amount {
        self.quantity * self.unit_price
    }
}

impl Entity for PurchaseRequestItem {
    const COLLECTION: &'static str = "purchase_request_items";
    const SEARCH_FIELDS: &'static [&'static str] = &["description"];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Approved,
    Rejected,
    Delivered,
    Cancelled,
}

/// An order placed with a supplier, numbered globally as `PO-0001`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub po_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_request_id: Option<RecordId>,
    pub supplier_name: String,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub total_amount: Amount,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    #[serde(flatten)]
    pub review: Review,
}

impl PurchaseOrder {
    pub fn number_format() -> DisplayNumberFormat {
        DisplayNumberFormat::new("PO-", 4)
    }
}

impl Entity for PurchaseOrder {
    const COLLECTION: &'static str = "purchase_orders";
    const SEARCH_FIELDS: &'static [&'static str] = &["poNumber", "supplierName"];
    const DEFAULT_SORT: Option<Sort> = Some(Sort::desc("orderDate"));
}

impl Approvable for PurchaseOrder {
    type Status = PurchaseOrderStatus;

    const APPROVED: PurchaseOrderStatus = PurchaseOrderStatus::Approved;
    const REJECTED: PurchaseOrderStatus = PurchaseOrderStatus::Rejected;
}

impl Labeled for PurchaseOrder {
    fn label(&self) -> String {
        self.po_number.clone()
    }
}
