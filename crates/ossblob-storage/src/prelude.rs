//! Prelude module for convenient imports.

#[cfg(any(test, feature = "mock"))]
pub use crate::backend::MemoryStorageClient;
pub use crate::backend::{MAX_SIGN_EXPIRATION_SECS, OssStorageClient, StorageClient};
pub use crate::blobstore::{BlobstoreClient, SignAction};
pub use crate::config::StorageConfig;
pub use crate::error::{StorageError, StorageResult};
