#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod blobstore;
mod config;
mod error;

#[doc(hidden)]
pub mod prelude;

#[cfg(any(test, feature = "mock"))]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub use backend::MemoryStorageClient;
pub use backend::{MAX_SIGN_EXPIRATION_SECS, OssStorageClient, StorageClient};
pub use blobstore::{BlobstoreClient, SignAction};
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};

/// Tracing target for storage operations.
pub const TRACING_TARGET: &str = "ossblob_storage";
