//! Command-line argument definitions.
//!
//! Responsibilities:
//! - Define the binary's flags using clap derive macros.
//!
//! Non-responsibilities:
//! - Does not load configuration; `Settings` fields come only from the env file
//!   and the environment, never from flags.

use clap::{Parser, ValueEnum};
use movescrow_config::constants::DEFAULT_ENV_FILE;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "movescrow-api")]
#[command(about = "Movescrow API server", long_about = None)]
#[command(version)]
#[command(
    after_help = "Configuration is read from the environment and an optional env file.\n\nExamples:\n  movescrow-api\n  movescrow-api --check\n  movescrow-api --env-file deploy/staging.env --log-format json\n  DOTENV_DISABLED=1 movescrow-api --check\n"
)]
pub struct Cli {
    /// Path to the env file (missing file is not an error)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Validate configuration, print the redacted summary and exit
    #[arg(long)]
    pub check: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}
