use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::store::{BlobBackend, StoreError};

/// Blob stored under a single Redis key.
pub struct RedisBlob {
    conn: MultiplexedConnection,
    key: String,
}

impl RedisBlob {
    pub async fn connect(url: &str, key: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self {
            conn,
            key: key.to_string(),
        })
    }
}

#[async_trait]
impl BlobBackend for RedisBlob {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let blob: Option<String> = conn.get(&self.key).await?;
        Ok(blob)
    }

    async fn write(&self, blob: String) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&self.key, blob).await?;
        Ok(())
    }
}
