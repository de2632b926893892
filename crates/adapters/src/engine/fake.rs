// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake automation engine for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{EngineError, StartRequest, StartResponse, StatusError, WorkflowEngine};
use async_trait::async_trait;
use ff_core::{ExecutionId, WorkflowStatusSnapshot};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Start(StartRequest),
    Status(ExecutionId),
}

#[derive(Default)]
struct FakeState {
    /// Per-execution scripted responses; the last one repeats
    scripts: HashMap<ExecutionId, VecDeque<Result<WorkflowStatusSnapshot, StatusError>>>,
    start_failure: Option<String>,
    status_delay: Option<Duration>,
    calls: Vec<EngineCall>,
}

/// Fake engine with scripted status responses
#[derive(Clone, Default)]
pub struct FakeEngine {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue responses for an execution, returned in order. Once one
    /// response is left it is returned for every later query.
    pub fn script(
        &self,
        execution_id: impl Into<ExecutionId>,
        responses: impl IntoIterator<Item = Result<WorkflowStatusSnapshot, StatusError>>,
    ) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state
            .scripts
            .entry(execution_id.into())
            .or_default()
            .extend(responses);
    }

    /// Replace every queued response for an execution with one
    pub fn set_status(
        &self,
        execution_id: impl Into<ExecutionId>,
        response: Result<WorkflowStatusSnapshot, StatusError>,
    ) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state
            .scripts
            .insert(execution_id.into(), VecDeque::from([response]));
    }

    /// Make every start request fail with `reason`
    pub fn fail_starts(&self, reason: impl Into<String>) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.start_failure = Some(reason.into());
    }

    /// Hold every status query for `delay` before answering
    pub fn set_status_delay(&self, delay: Duration) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.status_delay = Some(delay);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Status queries issued for one execution
    pub fn status_calls(&self, execution_id: &ExecutionId) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, EngineCall::Status(id) if id == execution_id))
            .count()
    }

    pub fn total_status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, EngineCall::Status(_)))
            .count()
    }

    pub fn started(&self) -> Vec<StartRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::Start(request) => Some(request),
                EngineCall::Status(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl WorkflowEngine for FakeEngine {
    async fn start(&self, request: &StartRequest) -> Result<StartResponse, EngineError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(EngineCall::Start(request.clone()));

        if let Some(reason) = &state.start_failure {
            return Err(EngineError::StartFailed {
                execution_id: request.execution_id.clone(),
                reason: reason.clone(),
            });
        }

        Ok(StartResponse {
            execution_id: request.execution_id.clone(),
            status: "accepted".to_string(),
        })
    }

    async fn status(
        &self,
        execution_id: &ExecutionId,
    ) -> Result<WorkflowStatusSnapshot, StatusError> {
        let (delay, response) = {
            let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(EngineCall::Status(execution_id.clone()));

            let response = match state.scripts.get_mut(execution_id) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            };
            (state.status_delay, response)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        response.unwrap_or_else(|| {
            Err(StatusError::Transient(format!(
                "no scripted response for {}",
                execution_id
            )))
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
