//! Candidate store: the only durable state in the service.
//!
//! The whole collection lives in one JSON blob. Every insert and delete
//! rewrites the blob; there is no update operation. Backends only know how
//! to read and write that blob, see [`BlobBackend`].

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::models::{CandidateId, CandidateProfile, CandidateRecord};

pub mod blob;
pub mod file;
pub mod kv;
pub mod memory;

pub use blob::{BlobBackend, BlobCandidateStore};
pub use file::FileBlob;
pub use kv::RedisBlob;
pub use memory::MemoryBlob;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("no candidate id left above {0}")]
    IdsExhausted(CandidateId),

    #[error("failed to encode candidate collection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage abstraction so the view layer stays storage-agnostic.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// All records in insertion order. Unreadable or corrupt storage reads
    /// as empty.
    async fn list(&self) -> Vec<CandidateRecord>;

    /// Appends a record with a fresh id and creation time. Fails without
    /// writing when the current collection cannot be read.
    async fn insert(&self, profile: CandidateProfile) -> Result<CandidateRecord, StoreError>;

    /// Removes the record if present. Absent ids are a no-op.
    async fn delete(&self, id: CandidateId) -> Result<(), StoreError>;
}

/// Looks a record up in a fresh `list()` snapshot.
pub async fn find(store: &dyn CandidateStore, id: CandidateId) -> Option<CandidateRecord> {
    store.list().await.into_iter().find(|r| r.id == id)
}

/// Builds the store selected by `STORE_BACKEND`.
pub async fn build_store(config: &Config) -> Result<Arc<dyn CandidateStore>> {
    let store: Arc<dyn CandidateStore> = match config.store_backend {
        StoreBackend::Memory => {
            info!("Candidate store: in-memory (not durable)");
            Arc::new(BlobCandidateStore::new(MemoryBlob::default()))
        }
        StoreBackend::File => {
            info!("Candidate store: file {}", config.store_path.display());
            Arc::new(BlobCandidateStore::new(FileBlob::new(&config.store_path)))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis store")?;
            let backend = RedisBlob::connect(url, &config.store_key)
                .await
                .context("Failed to connect to Redis")?;
            info!("Candidate store: redis key '{}'", config.store_key);
            Arc::new(BlobCandidateStore::new(backend))
        }
    };
    Ok(store)
}
