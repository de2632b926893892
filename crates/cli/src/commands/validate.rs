// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ff validate --action <json> --snapshot <json>` - Validate a snapshot offline

use crate::output::{self, OutputFormat, VerdictView};
use anyhow::{Context, Result};
use clap::Args;
use ff_core::{Action, WorkflowStatusSnapshot};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ValidateArgs {
    /// Action record (JSON file)
    #[arg(long)]
    pub action: PathBuf,

    /// Engine status snapshot (JSON file)
    #[arg(long)]
    pub snapshot: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    let action: Action = read_json(&args.action)?;
    let snapshot: WorkflowStatusSnapshot = read_json(&args.snapshot)?;

    let verdict = ff_core::validate(&action, &snapshot);
    output::print(&VerdictView(&verdict), args.format);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
