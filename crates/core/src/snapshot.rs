// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status snapshots reported by the automation engine

use crate::action::StepStatus;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Engine status collapsed onto the statuses an action can hold while polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    InProcess,
    Completed,
}

impl EngineStatus {
    /// Map an engine-native status string. Anything unrecognized is still
    /// in process.
    pub fn from_engine(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "completed" | "complete" | "done" | "success" | "succeeded" | "finished" => {
                EngineStatus::Completed
            }
            _ => EngineStatus::InProcess,
        }
    }
}

/// A step as the engine reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotStep {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_step_status")]
    pub status: StepStatus,
}

impl SnapshotStep {
    pub fn new(name: impl Into<String>, status: StepStatus) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status,
        }
    }
}

fn lenient_step_status<'de, D>(deserializer: D) -> Result<StepStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| StepStatus::from_engine(&s)).unwrap_or_default())
}

/// Clamp whatever number the engine sends into 0-100
fn clamped_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// One point-in-time view of an execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStatusSnapshot {
    #[serde(default, deserialize_with = "clamped_progress")]
    pub progress: u8,
    #[serde(default)]
    pub current_step: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub steps: Vec<SnapshotStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion: Option<String>,
    /// Run time the engine has observed so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u64>,
}

impl WorkflowStatusSnapshot {
    pub fn new(progress: u8, current_step: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            progress: progress.min(100),
            current_step: current_step.into(),
            status: status.into(),
            steps: Vec::new(),
            estimated_completion: None,
            elapsed_seconds: None,
        }
    }

    pub fn with_steps(mut self, steps: Vec<SnapshotStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_estimated_completion(mut self, eta: impl Into<String>) -> Self {
        self.estimated_completion = Some(eta.into());
        self
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed_seconds = Some(elapsed.as_secs());
        self
    }

    pub fn engine_status(&self) -> EngineStatus {
        EngineStatus::from_engine(&self.status)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed_seconds.map(Duration::from_secs)
    }

    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
