//! Cross-collection operations.
//!
//! This module provides:
//! - `Erp`, the bundle of typed repositories over one store handle
//! - Read-side joins that resolve references to display labels
//! - Header + items workflows that write several collections in sequence

pub mod joins;
pub mod workflows;

pub use joins::{ContractWithParties, ProjectWithDonor};
pub use workflows::{CashRequestWithItems, PurchaseRequestWithItems};

use crate::db::{Repository, StorageProvider, Store};
use crate::domain::{
    Amendment, CashRequest, CashRequestItem, Contract, Donor, Employee, Entity, Project,
    PurchaseOrder, PurchaseRequest, PurchaseRequestItem,
};
use crate::error::StoreResult;
use std::sync::Arc;

/// Every repository the application uses, sharing one store handle.
#[derive(Debug, Clone)]
pub struct Erp {
    store: Arc<dyn Store>,
}

impl Erp {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Open (or reuse) the provider's store and wrap it.
    pub async fn from_provider(provider: &StorageProvider) -> StoreResult<Self> {
        Ok(Self::new(provider.get_db().await?))
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Repository for any entity type.
    pub fn repo<T: Entity>(&self) -> Repository<T> {
        Repository::new(self.store.clone())
    }

    pub fn donors(&self) -> Repository<Donor> {
        self.repo()
    }

    pub fn projects(&self) -> Repository<Project> {
        self.repo()
    }

    pub fn amendments(&self) -> Repository<Amendment> {
        self.repo()
    }

    pub fn employees(&self) -> Repository<Employee> {
        self.repo()
    }

    pub fn contracts(&self) -> Repository<Contract> {
        self.repo()
    }

    pub fn purchase_requests(&self) -> Repository<PurchaseRequest> {
        self.repo()
    }

    pub fn purchase_request_items(&self) -> Repository<PurchaseRequestItem> {
        self.repo()
    }

    pub fn purchase_orders(&self) -> Repository<PurchaseOrder> {
        self.repo()
    }

    pub fn cash_requests(&self) -> Repository<CashRequest> {
        self.repo()
    }

    pub fn cash_request_items(&self) -> Repository<CashRequestItem> {
        self.repo()
    }
}
