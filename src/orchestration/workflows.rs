//! Header + items workflows.
//!
//! Each step is a single-collection write; there is no cross-collection
//! transaction. When an item write fails, the rows already written are
//! deleted again and the original error is returned.

use super::Erp;
use crate::db::Repository;
use crate::domain::{
    CashRequest, CashRequestItem, Entity, PurchaseRequest, PurchaseRequestItem, Record, RecordId,
};
use crate::error::{StoreError, StoreResult};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct CashRequestWithItems {
    pub request: Record<CashRequest>,
    pub items: Vec<Record<CashRequestItem>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequestWithItems {
    pub request: Record<PurchaseRequest>,
    pub items: Vec<Record<PurchaseRequestItem>>,
}

impl Erp {
    /// Create a cash request, its items, and set its total to the item sum.
    ///
    /// An empty `request_number` is filled with the project's next `CR-NNN`.
    /// Each item's `cash_request_id` is overwritten with the new header id.
    pub async fn create_cash_request_with_items(
        &self,
        mut request: CashRequest,
        items: Vec<CashRequestItem>,
    ) -> StoreResult<CashRequestWithItems> {
        let requests = self.cash_requests();
        let item_repo = self.cash_request_items();

        if request.request_number.trim().is_empty() {
            request.request_number = requests.generate_request_number(request.project_id).await?;
        }
        let header = requests.create(&request).await?;

        let mut written = Vec::with_capacity(items.len());
        for mut item in items {
            item.cash_request_id = header.id;
            match item_repo.create(&item).await {
                Ok(record) => written.push(record),
                Err(e) => return Err(rollback(&requests, &item_repo, header.id, &written, e).await),
            }
        }

        let request = match requests.recalculate_total(header.id, &item_repo).await {
            Ok(request) => request,
            Err(e) => return Err(rollback(&requests, &item_repo, header.id, &written, e).await),
        };
        info!(
            id = request.id.as_i64(),
            number = %request.request_number,
            items = written.len(),
            total = %request.total_amount,
            "Created cash request"
        );
        Ok(CashRequestWithItems {
            request,
            items: written,
        })
    }

    /// Create a purchase request and its items.
    ///
    /// An empty `pr_number` is filled with the next number for the request year.
    pub async fn create_purchase_request_with_items(
        &self,
        mut request: PurchaseRequest,
        items: Vec<PurchaseRequestItem>,
    ) -> StoreResult<PurchaseRequestWithItems> {
        let requests = self.purchase_requests();
        let item_repo = self.purchase_request_items();

        if request.pr_number.trim().is_empty() {
            request.pr_number = requests.generate_pr_number(request.request_date).await?;
        }
        let header = requests.create(&request).await?;

        let mut written = Vec::with_capacity(items.len());
        for mut item in items {
            item.purchase_request_id = header.id;
            match item_repo.create(&item).await {
                Ok(record) => written.push(record),
                Err(e) => return Err(rollback(&requests, &item_repo, header.id, &written, e).await),
            }
        }

        info!(
            id = header.id.as_i64(),
            number = %header.pr_number,
            items = written.len(),
            "Created purchase request"
        );
        Ok(PurchaseRequestWithItems {
            request: header,
            items: written,
        })
    }

    /// Delete a cash request's items, then the header.
    ///
    /// Returns the number of items removed. A missing header is not an error.
    pub async fn delete_cash_request_with_items(&self, id: RecordId) -> StoreResult<usize> {
        let item_repo = self.cash_request_items();
        let items = item_repo.for_request(id).await?;
        for item in &items {
            item_repo.delete(item.id).await?;
        }
        self.cash_requests().delete(id).await?;
        info!(id = id.as_i64(), items = items.len(), "Deleted cash request with items");
        Ok(items.len())
    }
}

/// Delete the items written so far and the header, then hand back `cause`.
///
/// Failures while cleaning up are logged; `cause` is what the caller sees.
async fn rollback<H: Entity, I: Entity>(
    headers: &Repository<H>,
    items: &Repository<I>,
    header_id: RecordId,
    written: &[Record<I>],
    cause: StoreError,
) -> StoreError {
    warn!(
        collection = H::COLLECTION,
        id = header_id.as_i64(),
        items = written.len(),
        error = %cause,
        "Workflow step failed, removing partially written records"
    );
    for item in written {
        if let Err(e) = items.delete(item.id).await {
            warn!(collection = I::COLLECTION, id = item.id.as_i64(), error = %e, "Cleanup delete failed");
        }
    }
    if let Err(e) = headers.delete(header_id).await {
        warn!(collection = H::COLLECTION, id = header_id.as_i64(), error = %e, "Cleanup delete failed");
    }
    cause
}
