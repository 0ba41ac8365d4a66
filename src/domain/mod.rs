//! Record shapes and pure helpers for the ERP data layer.
//!
//! This module provides:
//! - Lossless money handling via the `Amount` wrapper
//! - `RecordId`, the `Record<T>` envelope, and the `Entity` contract
//! - Equality/search filters and display sorting over stored documents
//! - Scope-local display numbers and in-memory label resolution
//! - One record type per collection (donors, projects, contracts, ...)

pub mod amount;
pub mod approval;
pub mod cash_request;
pub mod contract;
pub mod donor;
pub mod employee;
pub mod filter;
pub mod lookup;
pub mod primitives;
pub mod procurement;
pub mod project;
pub mod record;
pub mod sequence;

pub use amount::Amount;
pub use approval::{ApprovalMeta, Approvable, Review};
pub use cash_request::{CashRequest, CashRequestItem, CashRequestStatus};
pub use contract::{Contract, ContractStatus};
pub use donor::{Donor, DonorStatus};
pub use employee::{Employee, EmployeeStatus};
pub use filter::Filter;
pub use lookup::{resolve_label, LabelIndex, Labeled, UNKNOWN_LABEL};
pub use primitives::RecordId;
pub use procurement::{
    PurchaseOrder, PurchaseOrderStatus, PurchaseRequest, PurchaseRequestItem,
    PurchaseRequestStatus,
};
pub use project::{Amendment, AmendmentStatus, Project, ProjectStatus};
pub use record::{Document, Entity, Record, Sort, SortOrder};
pub use sequence::{next_number, DisplayNumberFormat};
