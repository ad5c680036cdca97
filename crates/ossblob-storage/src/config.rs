//! Storage configuration.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{StorageError, StorageResult};

/// Credentials and bucket identity for an OSS bucket.
///
/// Loaded once from a JSON document of the form:
///
/// ```json
/// {
///   "access_key_id": "...",
///   "secret_access_key": "...",
///   "endpoint": "oss-cn-hangzhou.aliyuncs.com",
///   "bucket_name": "my-bucket"
/// }
/// ```
///
/// Missing keys default to an empty string and unknown keys are ignored.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// OSS endpoint, with or without a scheme.
    pub endpoint: String,
    /// Bucket name.
    pub bucket_name: String,
}

impl StorageConfig {
    /// Creates a new configuration.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        endpoint: impl Into<String>,
        bucket_name: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            endpoint: endpoint.into(),
            bucket_name: bucket_name.into(),
        }
    }

    /// Reads a configuration from a JSON byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConfigRead`] if the stream cannot be fully
    /// consumed and [`StorageError::ConfigParse`] if it is not valid JSON.
    pub fn from_reader(mut reader: impl Read) -> StorageResult<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(StorageError::ConfigRead)?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Reads a configuration from the JSON file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> StorageResult<Self> {
        let file = File::open(path.as_ref()).map_err(StorageError::ConfigRead)?;
        Self::from_reader(file)
    }

    /// Returns a masked version of the access key ID for logging.
    ///
    /// This shows only the first 4 characters followed by asterisks.
    pub fn access_key_id_masked(&self) -> String {
        match self.access_key_id.get(..4) {
            Some(prefix) if self.access_key_id.len() > 4 => format!("{prefix}***"),
            _ => "*".repeat(self.access_key_id.len()),
        }
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key_id", &self.access_key_id_masked())
            .field("secret_access_key", &"***")
            .field("endpoint", &self.endpoint)
            .field("bucket_name", &self.bucket_name)
            .finish()
    }
}
