//! CLI error types.

use std::io;
use std::path::PathBuf;

use ossblob_storage::StorageError;
use thiserror::Error;

use crate::command::ArgumentError;

/// Process exit code for any failure.
pub const EXIT_FAILURE: i32 = 1;

/// Result type for CLI operations.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Everything that can end an invocation with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong arity, unknown command or malformed argument.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The configuration file is unreadable or malformed.
    #[error("loading configuration {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: StorageError,
    },

    /// The `put` source file is missing or cannot be stat'ed.
    #[error("source file {}: {source}", path.display())]
    Precondition {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backend call failed.
    #[error("performing operation {command}: {source}")]
    Operation {
        command: &'static str,
        #[source]
        source: StorageError,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_error_names_the_command() {
        let err = CliError::Operation {
            command: "put",
            source: StorageError::upload(StorageError::init("bucket is empty")),
        };
        assert_eq!(
            err.to_string(),
            "performing operation put: upload failure: storage initialization failed: bucket is empty"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn argument_error_is_transparent() {
        let err = CliError::from(ArgumentError::TooFewArguments(1));
        assert_eq!(err.to_string(), "expected at least two arguments got 1");
        assert_eq!(err.exit_code(), 1);
    }
}
