//! Command dispatch against a blobstore client.

use ossblob_storage::{BlobstoreClient, StorageClient};

use crate::TRACING_TARGET_DISPATCH;
use crate::command::Command;
use crate::error::{CliError, CliResult};

/// Process exit code when `exists` finds no object.
pub const EXIT_NOT_FOUND: i32 = 3;

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command completed.
    Success,
    /// `exists` completed and the object is absent.
    NotFound,
    /// `sign` completed with this URL.
    SignedUrl(String),
}

impl Outcome {
    /// Returns the process exit code for this outcome.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Success | Self::SignedUrl(_) => 0,
            Self::NotFound => EXIT_NOT_FOUND,
        }
    }
}

/// Status line printed to stderr by `exists`, independent of the log filter.
pub fn exists_message(key: &str, bucket: &str, found: bool) -> String {
    if found {
        format!("File '{key}' exists in bucket '{bucket}'")
    } else {
        format!("File '{key}' does not exist in bucket '{bucket}'")
    }
}

/// Runs a single command.
pub async fn execute<S: StorageClient>(
    client: &BlobstoreClient<S>,
    command: Command,
) -> CliResult<Outcome> {
    let name = command.name();
    let operation = |err| CliError::Operation {
        command: name,
        source: err,
    };

    tracing::debug!(target: TRACING_TARGET_DISPATCH, command = name, "Executing command");

    match command {
        Command::Put { source, key } => {
            if let Err(err) = tokio::fs::metadata(&source).await {
                return Err(CliError::Precondition {
                    path: source,
                    source: err,
                });
            }

            client.put(&source, &key).await.map_err(operation)?;
        }
        Command::Get { key, destination } => {
            client.get(&key, &destination).await.map_err(operation)?;
        }
        Command::Delete { key } => {
            client.delete(&key).await.map_err(operation)?;
        }
        Command::Exists { key } => {
            let found = client.exists(&key).await.map_err(operation)?;
            eprintln!("{}", exists_message(&key, client.bucket(), found));

            if !found {
                return Ok(Outcome::NotFound);
            }
        }
        Command::Sign {
            key,
            action,
            expires_in_secs,
        } => {
            let url = client
                .sign(&key, &action, expires_in_secs)
                .await
                .map_err(operation)?;
            return Ok(Outcome::SignedUrl(url));
        }
    }

    Ok(Outcome::Success)
}
