//! High-level blobstore operations.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use strum::{Display, EnumString};

use crate::TRACING_TARGET;
use crate::backend::{StorageClient, validate_expiration, validate_key};
use crate::error::{StorageError, StorageResult};

/// Access granted by a presigned URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SignAction {
    /// Read access.
    Get,
    /// Write access.
    Put,
}

/// Blobstore operations on top of a [`StorageClient`].
///
/// Keys are opaque: a key the backend would normalize (empty, leading or
/// trailing `/`, or containing `//`) is rejected with
/// [`StorageError::InvalidKey`] before any backend call.
///
/// Errors from the backend are returned unchanged, except for uploads which
/// are wrapped in [`StorageError::Upload`].
#[derive(Debug, Clone)]
pub struct BlobstoreClient<S> {
    storage: S,
}

impl<S: StorageClient> BlobstoreClient<S> {
    /// Wraps a storage client.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the underlying storage client.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Name of the configured bucket.
    pub fn bucket(&self) -> &str {
        self.storage.bucket()
    }

    /// Uploads the file at `source` to `key`.
    pub async fn put(&self, source: &Path, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.storage
            .upload(source, key)
            .await
            .map_err(StorageError::upload)?;

        tracing::info!(target: TRACING_TARGET, "Successfully uploaded file");
        Ok(())
    }

    /// Downloads `key` into the file at `destination`.
    pub async fn get(&self, key: &str, destination: &Path) -> StorageResult<()> {
        validate_key(key)?;
        self.storage.download(key, destination).await
    }

    /// Deletes `key`.
    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.storage.delete(key).await
    }

    /// Checks whether `key` exists.
    ///
    /// An `Ok(false)` means the object is absent; transport and auth
    /// failures are reported as `Err`.
    pub async fn exists(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        self.storage.exists(key).await
    }

    /// Issues a presigned URL for `key`.
    ///
    /// `action` is matched case-insensitively against `GET` and `PUT`.
    /// Windows longer than [`MAX_SIGN_EXPIRATION_SECS`] are rejected; the
    /// rest of the validity handling is left to the backend.
    ///
    /// [`MAX_SIGN_EXPIRATION_SECS`]: crate::MAX_SIGN_EXPIRATION_SECS
    pub async fn sign(
        &self,
        key: &str,
        action: &str,
        expires_in_secs: u64,
    ) -> StorageResult<String> {
        let action = SignAction::from_str(action)
            .map_err(|_| StorageError::unsupported_action(action.to_uppercase()))?;
        let expires_in = Duration::from_secs(expires_in_secs);
        validate_expiration(expires_in)?;
        validate_key(key)?;

        match action {
            SignAction::Get => self.storage.signed_url_get(key, expires_in).await,
            SignAction::Put => self.storage.signed_url_put(key, expires_in).await,
        }
    }
}
