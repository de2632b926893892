// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ff status <execution-id>` - Query the engine once

use crate::output::{self, OutputFormat, SnapshotView};
use anyhow::{bail, Result};
use clap::Args;
use ff_adapters::{HttpEngine, StatusError, TracedEngine, WorkflowStatusClient};
use ff_core::{ExecutionId, FinflowConfig};

#[derive(Args)]
pub struct StatusArgs {
    /// Execution id returned when the action was automated
    pub execution_id: String,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub async fn status(args: StatusArgs, config: &FinflowConfig) -> Result<()> {
    let engine = HttpEngine::new(&config.engine.base_url, config.engine.request_timeout)?;
    let client = WorkflowStatusClient::new(TracedEngine::new(engine), config.engine.request_timeout);
    let execution_id = ExecutionId(args.execution_id);

    match client.fetch_status(&execution_id).await {
        Ok(snapshot) => {
            output::print(&SnapshotView(&snapshot), args.format);
            Ok(())
        }
        Err(StatusError::NotFound(id)) => {
            bail!("execution {} is not known to the engine at {}", id, config.engine.base_url)
        }
        Err(StatusError::Transient(reason)) => {
            bail!("engine unavailable (try again): {}", reason)
        }
    }
}
