//! Storage layer.
//!
//! This module provides:
//! - The `Store` trait and its SQLite and in-memory implementations
//! - SQLite initialization, pragmas, and additive migrations
//! - The lazily opened `StorageProvider` handle
//! - The generic per-entity `Repository` and entity-specific helpers

pub mod memory;
pub mod migrations;
pub mod provider;
pub mod repo;
pub mod sqlite;
pub mod store;

pub use memory::MemoryStore;
pub use migrations::{init_db, init_memory_db, SqliteSettings};
pub use provider::StorageProvider;
pub use repo::Repository;
pub use sqlite::SqliteStore;
pub use store::Store;
