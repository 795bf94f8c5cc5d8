use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{BlobBackend, StoreError};

/// Process-local blob. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryBlob {
    blob: RwLock<Option<String>>,
}

impl MemoryBlob {
    /// Seeds the blob, e.g. with a legacy or corrupt payload.
    pub fn with_contents(blob: impl Into<String>) -> Self {
        Self {
            blob: RwLock::new(Some(blob.into())),
        }
    }
}

#[async_trait]
impl BlobBackend for MemoryBlob {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.read().await.clone())
    }

    async fn write(&self, blob: String) -> Result<(), StoreError> {
        *self.blob.write().await = Some(blob);
        Ok(())
    }
}
