// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status queries with a fixed per-call timeout

use crate::engine::{StatusError, WorkflowEngine};
use ff_core::{ExecutionId, WorkflowStatusSnapshot};
use std::time::Duration;

/// Wraps an engine so every status query is bounded by `timeout`.
/// A query that runs past it is reported as `Transient`.
#[derive(Clone)]
pub struct WorkflowStatusClient<E> {
    engine: E,
    timeout: Duration,
}

impl<E: WorkflowEngine> WorkflowStatusClient<E> {
    pub fn new(engine: E, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn fetch_status(
        &self,
        execution_id: &ExecutionId,
    ) -> Result<WorkflowStatusSnapshot, StatusError> {
        match tokio::time::timeout(self.timeout, self.engine.status(execution_id)).await {
            Ok(result) => result,
            Err(_) => Err(StatusError::Transient(format!(
                "status query for {} timed out after {:?}",
                execution_id, self.timeout
            ))),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
