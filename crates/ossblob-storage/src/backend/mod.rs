//! Storage backends.
//!
//! [`StorageClient`] is the capability surface the blobstore adapter needs
//! from a backend. [`OssStorageClient`] talks to Alibaba Cloud OSS, and
//! [`MemoryStorageClient`] (feature `mock`) keeps objects in process memory.

#[cfg(any(test, feature = "mock"))]
mod memory;
mod oss;
mod transfer;

use std::path::Path;
use std::time::Duration;

#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryStorageClient;
pub use oss::OssStorageClient;

use crate::error::{StorageError, StorageResult};

/// Longest accepted validity window for a presigned URL, in seconds (100 years).
pub const MAX_SIGN_EXPIRATION_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Object operations against a single bucket.
///
/// Every method issues exactly one backend request. Nothing is retried.
#[async_trait::async_trait]
pub trait StorageClient: Send + Sync {
    /// Name of the bucket this client operates on.
    fn bucket(&self) -> &str;

    /// Uploads the file at `source` to `key`, overwriting any existing object.
    async fn upload(&self, source: &Path, key: &str) -> StorageResult<()>;

    /// Downloads `key` into the file at `destination`, overwriting it.
    async fn download(&self, key: &str, destination: &Path) -> StorageResult<()>;

    /// Deletes `key`.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Checks whether `key` exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Issues a presigned URL granting read access to `key`.
    async fn signed_url_get(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Issues a presigned URL granting write access to `key`.
    async fn signed_url_put(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}

/// Rejects keys the backend would rewrite as filesystem paths.
///
/// Empty keys, a leading `/`, a trailing `/` and empty segments (`a//b`)
/// would otherwise be normalized onto a different object or the bucket root.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.starts_with('/') || key.ends_with('/') || key.contains("//") {
        return Err(StorageError::invalid_key(key));
    }

    Ok(())
}

/// Rejects validity windows longer than [`MAX_SIGN_EXPIRATION_SECS`].
pub(crate) fn validate_expiration(expires_in: Duration) -> StorageResult<()> {
    let secs = expires_in.as_secs();
    if secs > MAX_SIGN_EXPIRATION_SECS {
        return Err(StorageError::InvalidExpiration(secs));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_opaque_or_rejected() {
        for key in ["obj1", "a/b", "releases/v1.tgz", "a b", ".hidden"] {
            assert!(validate_key(key).is_ok(), "{key}");
        }

        for key in ["", "/", "/lead", "trail/", "a//b", "//"] {
            let err = validate_key(key).unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(ref k) if k == key));
        }
    }

    #[test]
    fn expiration_is_capped() {
        assert!(validate_expiration(Duration::ZERO).is_ok());
        assert!(validate_expiration(Duration::from_secs(MAX_SIGN_EXPIRATION_SECS)).is_ok());

        let err = validate_expiration(Duration::from_secs(MAX_SIGN_EXPIRATION_SECS + 1))
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidExpiration(_)));
        assert!(validate_expiration(Duration::from_secs(u64::MAX)).is_err());
    }
}
