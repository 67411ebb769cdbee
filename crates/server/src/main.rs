//! Movescrow API server entry point.
//!
//! Responsibilities:
//! - Parse command-line flags.
//! - Load and validate configuration exactly once, before anything else starts.
//! - Initialize logging and serve HTTP until a shutdown signal.
//!
//! Does NOT handle:
//! - Router construction (see `movescrow_api::app`).
//!
//! Invariants:
//! - A configuration failure prints every invalid field to stderr and exits with code 2.
//! - Secret values are never printed; `--check` prints the redacted summary.

mod args;
mod error;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use args::{Cli, LogFormat};
use clap::Parser;
use error::ExitCode;
use movescrow_config::{ConfigError, ConfigLoader, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match load_settings(&cli.env_file) {
        Ok(settings) => Arc::new(settings),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };

    init_tracing(&settings, cli.log_format);

    if cli.check {
        print_summary(&settings);
        std::process::exit(ExitCode::Success.as_i32());
    }

    if settings.debug {
        tracing::warn!("DEBUG is enabled; do not run this configuration in production");
    }

    let exit_code = match run(settings).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::GeneralError
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn load_settings(env_file: &Path) -> Result<Settings, ConfigError> {
    ConfigLoader::new()
        .with_env_file(env_file)
        .load_env_file()?
        .from_env()
        .build()
}

/// `RUST_LOG` wins; otherwise `debug` in development and `info` in production.
fn init_tracing(settings: &Settings, format: LogFormat) {
    let default_level = if settings.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn print_summary(settings: &Settings) {
    println!("Configuration OK");
    for entry in settings.redacted_summary() {
        println!("  {:<28} {:<9} {}", entry.key, entry.kind, entry.value);
    }
}

async fn run(settings: Arc<Settings>) -> anyhow::Result<()> {
    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    movescrow_api::serve(settings, listener, movescrow_api::shutdown_signal())
        .await
        .context("HTTP server failed")
}
