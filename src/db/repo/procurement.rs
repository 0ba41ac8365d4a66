//! Purchase request and purchase order helpers.

use super::Repository;
use crate::domain::{
    Amount, Filter, PurchaseOrder, PurchaseRequest, PurchaseRequestItem, Record, RecordId,
};
use crate::error::StoreResult;
use chrono::NaiveDate;

impl Repository<PurchaseRequest> {
    /// Next `PR-<year>-NNN` for the year of `request_date`.
    pub async fn generate_pr_number(&self, request_date: NaiveDate) -> StoreResult<String> {
        let existing = self.field_values(&Filter::new(), "prNumber").await?;
        Ok(PurchaseRequest::number_format(request_date)
            .next(existing.iter().map(String::as_str)))
    }

    pub async fn for_project(
        &self,
        project_id: RecordId,
    ) -> StoreResult<Vec<Record<PurchaseRequest>>> {
        self.get_all(&Filter::new().eq("projectId", project_id)).await
    }
}

impl Repository<PurchaseRequestItem> {
    pub async fn for_request(
        &self,
        purchase_request_id: RecordId,
    ) -> StoreResult<Vec<Record<PurchaseRequestItem>>> {
        self.get_all(&Filter::new().eq("purchaseRequestId", purchase_request_id))
            .await
    }

    /// Sum of quantity * unit price over a request's items.
    pub async fn estimated_total(&self, purchase_request_id: RecordId) -> StoreResult<Amount> {
        Ok(self
            .for_request(purchase_request_id)
            .await?
            .iter()
            .map(|item| item.line_total())
            .sum())
    }
}

impl Repository<PurchaseOrder> {
    /// Next global `PO-NNNN`.
    pub async fn generate_po_number(&self) -> StoreResult<String> {
        let existing = self.field_values(&Filter::new(), "poNumber").await?;
        Ok(PurchaseOrder::number_format().next(existing.iter().map(String::as_str)))
    }

    pub async fn for_purchase_request(
        &self,
        purchase_request_id: RecordId,
    ) -> StoreResult<Vec<Record<PurchaseOrder>>> {
        self.get_all(&Filter::new().eq("purchaseRequestId", purchase_request_id))
            .await
    }
}
