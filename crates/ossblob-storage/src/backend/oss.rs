//! Alibaba Cloud OSS backend.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use opendal::{Operator, services};

use super::{StorageClient, validate_expiration};
use super::transfer::{download_file, upload_file};
use crate::TRACING_TARGET;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// OSS client that opens a fresh backend session for every call.
///
/// No connection is shared across calls: each operation builds its own
/// OpenDAL [`Operator`] from the stored configuration and drops it on
/// return, on every exit path.
#[derive(Clone)]
pub struct OssStorageClient {
    config: StorageConfig,
}

impl OssStorageClient {
    /// Creates a new OSS client from configuration.
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration for this client.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Establishes a backend session for a single operation.
    fn connect(&self) -> StorageResult<Operator> {
        let builder = services::Oss::default()
            .bucket(&self.config.bucket_name)
            .endpoint(&self.config.endpoint)
            .access_key_id(&self.config.access_key_id)
            .access_key_secret(&self.config.secret_access_key);

        Operator::new(builder)
            .map(|op| op.finish())
            .map_err(|e| StorageError::init(e.to_string()))
    }
}

#[async_trait::async_trait]
impl StorageClient for OssStorageClient {
    fn bucket(&self) -> &str {
        &self.config.bucket_name
    }

    async fn upload(&self, source: &Path, key: &str) -> StorageResult<()> {
        tracing::info!(
            target: TRACING_TARGET,
            "Uploading {}/{}",
            self.config.bucket_name,
            key
        );

        let operator = self.connect()?;
        let size = upload_file(&operator, source, key).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            size,
            "Upload complete"
        );

        Ok(())
    }

    async fn download(&self, key: &str, destination: &Path) -> StorageResult<()> {
        tracing::info!(
            target: TRACING_TARGET,
            "Downloading {}/{}",
            self.config.bucket_name,
            key
        );

        let operator = self.connect()?;
        let size = download_file(&operator, key, destination).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            size,
            "Download complete"
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        tracing::info!(
            target: TRACING_TARGET,
            "Deleting {}/{}",
            self.config.bucket_name,
            key
        );

        let operator = self.connect()?;
        operator.delete(key).await?;

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        tracing::info!(
            target: TRACING_TARGET,
            "Checking if blob: {}/{}",
            self.config.bucket_name,
            key
        );

        let operator = self.connect()?;
        Ok(operator.exists(key).await?)
    }

    async fn signed_url_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        tracing::info!(
            target: TRACING_TARGET,
            "Getting signed GET url for blob {}/{}",
            self.config.bucket_name,
            key
        );

        validate_expiration(expires_in)?;
        let operator = self.connect()?;
        let request = operator.presign_read(key, expires_in).await?;

        Ok(request.uri().to_string())
    }

    async fn signed_url_put(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        tracing::info!(
            target: TRACING_TARGET,
            "Getting signed PUT url for blob {}/{}",
            self.config.bucket_name,
            key
        );

        validate_expiration(expires_in)?;
        let operator = self.connect()?;
        let request = operator.presign_write(key, expires_in).await?;

        Ok(request.uri().to_string())
    }
}

impl fmt::Debug for OssStorageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OssStorageClient")
            .field("bucket", &self.config.bucket_name)
            .field("endpoint", &self.config.endpoint)
            .finish()
    }
}
