#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod dispatch;
mod error;
mod telemetry;

use std::process;

use clap::Parser;
use ossblob_storage::{BlobstoreClient, OssStorageClient, StorageConfig};

use crate::command::{ArgumentError, Command};
use crate::config::{Cli, log_storage_config};
use crate::dispatch::Outcome;
use crate::error::{CliError, CliResult};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "ossblob_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "ossblob_cli::config";
pub const TRACING_TARGET_DISPATCH: &str = "ossblob_cli::dispatch";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if cli.show_version {
        println!("{}", Cli::version_line());
        process::exit(0);
    }

    if let Err(error) = telemetry::init_tracing() {
        eprintln!("Warning: {error:#}");
    }
    Cli::log_build_info();

    let command_args = cli.args.clone();
    let error = match run(cli).await {
        Ok(outcome) => {
            if let Outcome::SignedUrl(url) = &outcome {
                println!("{url}");
            }
            process::exit(outcome.exit_code());
        }
        Err(error) => error,
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            args = ?command_args,
            "{error}"
        );
    } else {
        eprintln!("Error: {error}");
    }

    process::exit(error.exit_code());
}

/// Validates arguments, loads the configuration and runs the command.
///
/// Arguments are validated before the configuration is read, so argument
/// errors never reach the backend.
async fn run(cli: Cli) -> CliResult<Outcome> {
    let command = Command::from_args(&cli.args)?;
    let config_path = cli.config_path.ok_or(ArgumentError::MissingConfigPath)?;

    let config = StorageConfig::from_path(&config_path).map_err(|source| CliError::Config {
        path: config_path.clone(),
        source,
    })?;
    log_storage_config(&config);

    let client = BlobstoreClient::new(OssStorageClient::new(config));
    dispatch::execute(&client, command).await
}
