//! In-memory backend for tests.

use std::path::Path;
use std::time::Duration;

use opendal::{Operator, services};

use super::{StorageClient, validate_expiration};
use super::transfer::{download_file, upload_file};
use crate::TRACING_TARGET;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// Storage client keeping objects in process memory.
///
/// Clones share the same objects. Signed URLs are not cryptographically
/// signed; they are deterministic strings shaped like OSS virtual-hosted
/// URLs so callers can assert on bucket, endpoint and key.
#[derive(Debug, Clone)]
pub struct MemoryStorageClient {
    operator: Operator,
    bucket: String,
    endpoint: String,
}

impl MemoryStorageClient {
    /// Creates an empty in-memory bucket named after `config.bucket_name`.
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let operator = Operator::new(services::Memory::default())
            .map(|op| op.finish())
            .map_err(|e| StorageError::init(e.to_string()))?;

        Ok(Self {
            operator,
            bucket: config.bucket_name.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    fn signed_url(&self, key: &str, method: &str, expires_in: Duration) -> StorageResult<String> {
        validate_expiration(expires_in)?;
        Ok(format!(
            "http://{}.{}/{}?Expires={}&Method={}",
            self.bucket,
            self.endpoint,
            key,
            expires_in.as_secs(),
            method
        ))
    }
}

#[async_trait::async_trait]
impl StorageClient for MemoryStorageClient {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(&self, source: &Path, key: &str) -> StorageResult<()> {
        tracing::debug!(target: TRACING_TARGET, key = %key, "Uploading to memory");
        upload_file(&self.operator, source, key).await?;
        Ok(())
    }

    async fn download(&self, key: &str, destination: &Path) -> StorageResult<()> {
        tracing::debug!(target: TRACING_TARGET, key = %key, "Downloading from memory");
        download_file(&self.operator, key, destination).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        Ok(self.operator.delete(key).await?)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.operator.exists(key).await?)
    }

    async fn signed_url_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.signed_url(key, "GET", expires_in)
    }

    async fn signed_url_put(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.signed_url(key, "PUT", expires_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_objects() {
        let client = MemoryStorageClient::new(&StorageConfig::new("id", "s", "e", "b")).unwrap();
        let other = client.clone();

        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("f");
        tokio::fs::write(&source, b"x").await.unwrap();

        client.upload(&source, "k").await.unwrap();
        assert!(other.exists("k").await.unwrap());

        other.delete("k").await.unwrap();
        assert!(!client.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn signed_url_shape() {
        let client = MemoryStorageClient::new(&StorageConfig::new("id", "s", "e", "b")).unwrap();
        let url = client
            .signed_url_get("obj1", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(url, "http://b.e/obj1?Expires=60&Method=GET");
    }
}
