// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automation engine adapters

mod http;

pub use http::HttpEngine;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{EngineCall, FakeEngine};

use async_trait::async_trait;
use ff_core::{ExecutionId, WorkflowStatusSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from starting an execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("start failed for {execution_id}: {reason}")]
    StartFailed {
        execution_id: ExecutionId,
        reason: String,
    },
    #[error("engine client error: {0}")]
    Client(String),
}

/// Errors from a status query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// Network failure, timeout, 5xx or an unreadable body; retried next tick
    #[error("transient status error: {0}")]
    Transient(String),
    /// The engine has no record of the execution
    #[error("execution not found: {0}")]
    NotFound(ExecutionId),
}

impl StatusError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StatusError::Transient(_))
    }
}

/// Body of a start request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    pub execution_id: ExecutionId,
    pub user_id: String,
    /// The action as the user saw it when they automated it
    pub context: serde_json::Value,
}

/// Engine acknowledgement of a start request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub execution_id: ExecutionId,
    #[serde(default)]
    pub status: String,
}

/// Adapter for the external automation engine
#[async_trait]
pub trait WorkflowEngine: Clone + Send + Sync + 'static {
    /// Ask the engine to begin executing
    async fn start(&self, request: &StartRequest) -> Result<StartResponse, EngineError>;

    /// Current state of an execution
    async fn status(&self, execution_id: &ExecutionId)
        -> Result<WorkflowStatusSnapshot, StatusError>;
}
