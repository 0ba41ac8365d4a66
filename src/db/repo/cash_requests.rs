//! Cash request numbering and item totals.

use super::Repository;
use crate::domain::{Amount, CashRequest, CashRequestItem, Filter, Record, RecordId};
use crate::error::{StoreError, StoreResult};
use serde_json::json;
use tracing::debug;

impl Repository<CashRequest> {
    /// Next `CR-NNN` within one project.
    pub async fn generate_request_number(&self, project_id: RecordId) -> StoreResult<String> {
        let existing = self
            .field_values(&Filter::new().eq("projectId", project_id), "requestNumber")
            .await?;
        Ok(CashRequest::number_format().next(existing.iter().map(String::as_str)))
    }

    pub async fn for_project(&self, project_id: RecordId) -> StoreResult<Vec<Record<CashRequest>>> {
        self.get_all(&Filter::new().eq("projectId", project_id)).await
    }

    /// Set the header's `totalAmount` to the sum of its items.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if the header does not exist.
    pub async fn recalculate_total(
        &self,
        id: RecordId,
        items: &Repository<CashRequestItem>,
    ) -> StoreResult<Record<CashRequest>> {
        if self.get_by_id(id).await?.is_none() {
            return Err(StoreError::not_found(self.collection(), id));
        }
        let total = items.total_for(id).await?;
        debug!(id = id.as_i64(), total = %total, "Recalculated cash request total");
        self.update(id, &json!({ "totalAmount": total })).await
    }
}

impl Repository<CashRequestItem> {
    /// Items pointing at `cash_request_id`, whether or not the header still exists.
    pub async fn for_request(
        &self,
        cash_request_id: RecordId,
    ) -> StoreResult<Vec<Record<CashRequestItem>>> {
        self.get_all(&Filter::new().eq("cashRequestId", cash_request_id))
            .await
    }

    pub async fn total_for(&self, cash_request_id: RecordId) -> StoreResult<Amount> {
        Ok(self
            .for_request(cash_request_id)
            .await?
            .iter()
            .map(|item| item.amount)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, Store};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn repos() -> (Repository<CashRequest>, Repository<CashRequestItem>) {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        (Repository::new(store.clone()), Repository::new(store))
    }

    fn request(project: i64, number: &str) -> CashRequest {
        let mut request = CashRequest::new(
            RecordId::new(project),
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            "Field trip",
        );
        request.request_number = number.to_string();
        request
    }

    fn item(request_id: RecordId, amount: i64) -> CashRequestItem {
        let mut item = CashRequestItem::detached("Fuel", Amount::from(amount));
        item.cash_request_id = request_id;
        item
    }

    #[tokio::test]
    async fn test_request_numbers_are_per_project() {
        let (requests, _) = repos();
        assert_eq!(
            requests.generate_request_number(RecordId::new(1)).await.unwrap(),
            "CR-001"
        );
        requests.create(&request(1, "CR-001")).await.unwrap();
        requests.create(&request(1, "CR-002")).await.unwrap();
        requests.create(&request(2, "CR-010")).await.unwrap();

        assert_eq!(
            requests.generate_request_number(RecordId::new(1)).await.unwrap(),
            "CR-003"
        );
        assert_eq!(
            requests.generate_request_number(RecordId::new(2)).await.unwrap(),
            "CR-011"
        );
        assert_eq!(requests.for_project(RecordId::new(2)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recalculate_total() {
        let (requests, items) = repos();
        let header = requests.create(&request(1, "CR-001")).await.unwrap();
        items.create(&item(header.id, 150)).await.unwrap();
        items.create(&item(header.id, 250)).await.unwrap();
        items.create(&item(RecordId::new(99), 1)).await.unwrap();

        let updated = requests.recalculate_total(header.id, &items).await.unwrap();
        assert_eq!(updated.total_amount, Amount::from(400));
        assert_eq!(updated.request_number, "CR-001");
    }

    #[tokio::test]
    async fn test_recalculate_total_missing_header() {
        let (requests, items) = repos();
        items.create(&item(RecordId::new(7), 10)).await.unwrap();
        let err = requests
            .recalculate_total(RecordId::new(7), &items)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_items_survive_header_delete() {
        let (requests, items) = repos();
        let header = requests.create(&request(1, "CR-001")).await.unwrap();
        items.create(&item(header.id, 150)).await.unwrap();
        requests.delete(header.id).await.unwrap();

        let orphans = items.for_request(header.id).await.unwrap();
        assert_eq!(orphans.len(), 1);
        assert_eq!(items.total_for(header.id).await.unwrap(), Amount::from(150));
    }
}
