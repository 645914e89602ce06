//! Builds the configured key-value backend.

use crate::infra::config::StoreBackend;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, PostgresStore};
use anyhow::Result;
use std::sync::Arc;

pub async fn open_store(backend: &StoreBackend) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File { dir } => Arc::new(FileStore::open(dir.clone()).await?),
        StoreBackend::Postgres { database_url } => {
            Arc::new(PostgresStore::connect(database_url).await?)
        }
    };
    tracing::info!(backend = store.backend_name(), "opened key-value store");
    Ok(store)
}
