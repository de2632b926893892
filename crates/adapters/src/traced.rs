// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced engine wrapper for consistent observability

use crate::engine::{EngineError, StartRequest, StartResponse, StatusError, WorkflowEngine};
use async_trait::async_trait;
use ff_core::{ExecutionId, WorkflowStatusSnapshot};
use tracing::Instrument;

/// Wrapper that adds tracing to any WorkflowEngine
#[derive(Clone)]
pub struct TracedEngine<E> {
    inner: E,
}

impl<E> TracedEngine<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: WorkflowEngine> WorkflowEngine for TracedEngine<E> {
    async fn start(&self, request: &StartRequest) -> Result<StartResponse, EngineError> {
        let span = tracing::info_span!(
            "engine.start",
            execution_id = %request.execution_id,
            user_id = %request.user_id
        );

        async {
            tracing::info!("starting");

            let start = std::time::Instant::now();
            let result = self.inner.start(request).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(response) => tracing::info!(
                    status = %response.status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "execution started"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "start failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn status(
        &self,
        execution_id: &ExecutionId,
    ) -> Result<WorkflowStatusSnapshot, StatusError> {
        let span = tracing::info_span!("engine.status", execution_id = %execution_id);

        async {
            let start = std::time::Instant::now();
            let result = self.inner.status(execution_id).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(snapshot) => tracing::debug!(
                    progress = snapshot.progress,
                    status = %snapshot.status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "status"
                ),
                // Polling retries transient errors on the next tick
                Err(StatusError::Transient(reason)) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    reason = %reason,
                    "transient status error"
                ),
                Err(e @ StatusError::NotFound(_)) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "execution not found"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
