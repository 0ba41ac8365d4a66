//! Lazily opened, shared storage handle.

use super::migrations::{init_db, SqliteSettings};
use super::{MemoryStore, SqliteStore, Store};
use crate::config::{Config, StoreBackend};
use crate::error::{StoreError, StoreResult};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// Hands out one shared store, opening it on first use.
///
/// Construct one per process (or per test) and pass it down; there is no
/// global instance.
#[derive(Debug)]
pub struct StorageProvider {
    config: Config,
    handle: OnceCell<Arc<dyn Store>>,
}

impl StorageProvider {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handle: OnceCell::new(),
        }
    }

    /// Provider that always returns `store`, e.g. a test fake.
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self {
            config: Config::in_memory(),
            handle: OnceCell::new_with(Some(store)),
        }
    }

    /// The shared store, opened and migrated on the first call.
    ///
    /// Later calls return the same handle. A failed open is reported as
    /// [`StoreError::Unavailable`] and nothing is cached.
    pub async fn get_db(&self) -> StoreResult<Arc<dyn Store>> {
        self.handle
            .get_or_try_init(|| open_store(&self.config))
            .await
            .cloned()
    }

    pub fn is_open(&self) -> bool {
        self.handle.initialized()
    }
}

async fn open_store(config: &Config) -> StoreResult<Arc<dyn Store>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Opening in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Sqlite => {
            let path = config.database_path.as_deref().ok_or_else(|| {
                StoreError::Unavailable("no database path configured".to_string())
            })?;
            let settings = SqliteSettings {
                max_connections: config.max_connections,
                busy_timeout_ms: config.busy_timeout_ms,
            };
            let pool = init_db(path, settings).await?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
    }
}
