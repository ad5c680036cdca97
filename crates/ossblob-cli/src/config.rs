//! CLI configuration management.
//!
//! Flags are parsed with clap; the remaining positional arguments are turned
//! into a [`Command`](crate::command::Command) separately so arity errors are
//! reported the same way for every subcommand.
//!
//! # Example
//!
//! ```bash
//! ossblob -c config.json put ./local.tgz remote/key.tgz
//! ossblob -v
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use ossblob_storage::StorageConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "ossblob")]
#[command(about = "Alibaba OSS blobstore client")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short = 'c', value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Print the version and exit.
    #[arg(short = 'v')]
    pub show_version: bool,

    /// Command followed by its arguments:
    /// put <file> <key> | get <key> <file> | delete <key> | exists <key> |
    /// sign <key> <get|put> <ttl-seconds>
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Returns the version line printed by `-v`.
    pub fn version_line() -> String {
        format!("version {}", env!("CARGO_PKG_VERSION"))
    }

    /// Logs build information at debug level.
    pub fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            "Build information"
        );
    }
}

/// Logs the loaded storage configuration (no sensitive information).
pub fn log_storage_config(config: &StorageConfig) {
    tracing::debug!(
        target: TRACING_TARGET_CONFIG,
        access_key_id = %config.access_key_id_masked(),
        endpoint = %config.endpoint,
        bucket = %config.bucket_name,
        "Storage configuration loaded"
    );
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_config_flag_and_arguments() {
        let cli = Cli::try_parse_from(["ossblob", "-c", "/etc/oss.json", "put", "f", "k"]).unwrap();
        assert_eq!(cli.config_path, Some(PathBuf::from("/etc/oss.json")));
        assert!(!cli.show_version);
        assert_eq!(cli.args, vec!["put", "f", "k"]);
    }

    #[test]
    fn parses_version_flag() {
        let cli = Cli::try_parse_from(["ossblob", "-v"]).unwrap();
        assert!(cli.show_version);
        assert!(cli.args.is_empty());
        assert!(Cli::version_line().starts_with("version "));
    }

    #[test]
    fn keeps_hyphenated_keys_as_arguments() {
        let cli = Cli::try_parse_from(["ossblob", "-c", "c.json", "delete", "-odd-key"]).unwrap();
        assert_eq!(cli.args, vec!["delete", "-odd-key"]);
    }
}
