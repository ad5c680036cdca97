//! Storage error types.

use std::io;
use std::path::{Path, PathBuf};

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The configuration stream could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigRead(#[source] io::Error),

    /// The configuration is not valid JSON.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Failed to initialize the storage backend.
    #[error("storage initialization failed: {0}")]
    Init(String),

    /// Object not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A local file could not be opened, read or written.
    #[error("local file {}: {source}", path.display())]
    LocalFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Uploading an object failed.
    #[error("upload failure: {0}")]
    Upload(#[source] Box<StorageError>),

    /// The requested signing action is not supported.
    #[error("action not implemented: {0}")]
    UnsupportedAction(String),

    /// The object key cannot be used as-is by the backend.
    #[error("invalid object key '{0}'")]
    InvalidKey(String),

    /// The presigned URL validity window is out of range.
    #[error("expiration of {0} seconds exceeds the maximum of {max} seconds", max = crate::MAX_SIGN_EXPIRATION_SECS)]
    InvalidExpiration(u64),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(opendal::Error),
}

impl StorageError {
    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Creates a new local file error.
    pub fn local_file(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::LocalFile {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wraps an error raised while uploading.
    pub fn upload(err: StorageError) -> Self {
        Self::Upload(Box::new(err))
    }

    /// Creates a new invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey(key.into())
    }

    /// Creates a new unsupported action error.
    pub fn unsupported_action(action: impl Into<String>) -> Self {
        Self::UnsupportedAction(action.into())
    }

    /// Returns `true` if the object does not exist, looking through upload wrapping.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Upload(inner) => inner.is_not_found(),
            _ => false,
        }
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        use opendal::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::Backend(err),
        }
    }
}
