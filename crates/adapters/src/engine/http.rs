// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP automation engine client

use super::{EngineError, StartRequest, StartResponse, StatusError, WorkflowEngine};
use async_trait::async_trait;
use ff_core::{ExecutionId, WorkflowStatusSnapshot};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Talks to the engine's REST API:
///   - `POST {base}/workflows/start`
///   - `GET {base}/workflows/{execution_id}/status`
#[derive(Clone)]
pub struct HttpEngine {
    client: Client,
    base_url: String,
}

impl HttpEngine {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| EngineError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn start_url(&self) -> String {
        format!("{}/workflows/start", self.base_url)
    }

    fn status_url(&self, execution_id: &ExecutionId) -> String {
        format!("{}/workflows/{}/status", self.base_url, execution_id)
    }
}

/// Map a non-success status code to a status query error
fn classify(code: StatusCode, execution_id: &ExecutionId) -> StatusError {
    if code == StatusCode::NOT_FOUND {
        StatusError::NotFound(execution_id.clone())
    } else {
        StatusError::Transient(format!("engine returned HTTP {}", code))
    }
}

#[async_trait]
impl WorkflowEngine for HttpEngine {
    async fn start(&self, request: &StartRequest) -> Result<StartResponse, EngineError> {
        let failed = |reason: String| EngineError::StartFailed {
            execution_id: request.execution_id.clone(),
            reason,
        };

        let response = self
            .client
            .post(self.start_url())
            .json(request)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let code = response.status();
        if !code.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failed(format!("HTTP {}: {}", code, body.trim())));
        }

        response
            .json::<StartResponse>()
            .await
            .map_err(|e| failed(format!("invalid start response: {}", e)))
    }

    async fn status(
        &self,
        execution_id: &ExecutionId,
    ) -> Result<WorkflowStatusSnapshot, StatusError> {
        let response = self
            .client
            .get(self.status_url(execution_id))
            .send()
            .await
            .map_err(|e| StatusError::Transient(e.to_string()))?;

        let code = response.status();
        if !code.is_success() {
            return Err(classify(code, execution_id));
        }

        response
            .json::<WorkflowStatusSnapshot>()
            .await
            .map_err(|e| StatusError::Transient(format!("invalid status body: {}", e)))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
