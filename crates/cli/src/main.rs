// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]

//! ff - finflow action lifecycle CLI

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{run, status, validate};
use ff_core::FinflowConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "ff",
    version,
    about = "finflow - automate suggested financial actions and track them to completion"
)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "finflow.toml")]
    config: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an engine snapshot against an action
    Validate(validate::ValidateArgs),
    /// Query the engine once for an execution's status
    Status(status::StatusArgs),
    /// Load a feed, automate actions, and follow them to completion
    Run(run::RunArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.as_deref())?;

    match cli.command {
        // Pure; needs no configuration
        Commands::Validate(args) => validate::validate(args),
        Commands::Status(args) => status::status(args, &load_config(&cli.config)?).await,
        Commands::Run(args) => run::run(args, &load_config(&cli.config)?).await,
    }
}

fn load_config(path: &Path) -> Result<FinflowConfig> {
    let config = FinflowConfig::load(path)
        .with_context(|| format!("loading configuration from {}", path.display()))?
        .with_env_overrides();
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Install the global subscriber. The returned guard flushes the file
/// writer on drop and must live until exit.
fn setup_logging(
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(Some(guard))
}
