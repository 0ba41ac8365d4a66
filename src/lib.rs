pub mod backup;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod export;
pub mod orchestration;

pub use config::Config;
pub use db::{MemoryStore, Repository, SqliteStore, StorageProvider, Store};
pub use domain::{Amount, Entity, Filter, Record, RecordId};
pub use error::{StoreError, StoreResult};
pub use orchestration::Erp;
