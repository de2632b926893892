// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action state machine
//!
//! An action starts as a `suggested` card, becomes `in_process` once the user
//! hands it to the automation engine, and ends `completed` when the engine
//! reports it done. Cancellation is not a status: a cancelled action is
//! removed from the store.
//!
//! Transitions are pure: they return a new `Action` (or a reason nothing
//! changed) and leave it to the caller to write the result back.

use crate::snapshot::{EngineStatus, SnapshotStep, WorkflowStatusSnapshot};
use crate::validator;
use crate::verdict::ValidationVerdict;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Instant;
use thiserror::Error;

/// Unique identifier for an action
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ActionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of one run of an action inside the automation engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(pub String);

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExecutionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Lifecycle status of an action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Suggested,
    InProcess,
    Completed,
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStatus::Suggested => write!(f, "suggested"),
            ActionStatus::InProcess => write!(f, "in_process"),
            ActionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Status of a single workflow step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl StepStatus {
    /// Map an engine-native step status. Unknown values read as pending.
    pub fn from_engine(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "in_progress" | "in-progress" | "in_process" | "running" | "active" => {
                StepStatus::InProgress
            }
            "completed" | "complete" | "done" | "success" | "succeeded" => StepStatus::Completed,
            "failed" | "failure" | "error" | "errored" => StepStatus::Failed,
            _ => StepStatus::Pending,
        }
    }
}

/// One step of an action's workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: StepStatus,
}

impl Step {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: StepStatus::Pending,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: StepStatus) -> Self {
        self.status = status;
        self
    }
}

/// A unit of financial automation and its lifecycle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default, deserialize_with = "non_negative_saving")]
    pub potential_saving: f64,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<ExecutionId>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion: Option<String>,
    /// Last verdict computed for this action; never written out
    #[serde(skip)]
    pub verdict: Option<ValidationVerdict>,
    /// When the action entered `in_process`
    #[serde(skip)]
    pub started_at: Option<Instant>,
}

fn non_negative_saving<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(format!(
            "potentialSaving must be a non-negative amount, got {}",
            value
        )))
    }
}

/// Rejected lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {op} action {id}: status is {status}")]
    InvalidStatus {
        id: ActionId,
        op: &'static str,
        status: ActionStatus,
    },
}

/// A record that breaks the status/execution-id invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("action {0} is suggested but already has an execution id")]
    SuggestedWithExecution(ActionId),
    #[error("action {0} is suggested but has progress")]
    SuggestedWithProgress(ActionId),
    #[error("action {0} is in process without an execution id")]
    InProcessWithoutExecution(ActionId),
    #[error("action {id} has progress {progress} outside 0-100")]
    ProgressOutOfRange { id: ActionId, progress: u8 },
}

/// Result of folding an engine snapshot into an action
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotMerge {
    /// The snapshot was merged; `completed` is true when it finished the action
    Applied { action: Box<Action>, completed: bool },
    /// The snapshot is behind what is stored and was discarded whole
    Stale { stored: u8, fetched: u8 },
    /// The action is no longer in process
    NotInProcess(ActionStatus),
}

impl Action {
    /// Create a new suggested action
    pub fn suggested(id: impl Into<ActionId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            rationale: String::new(),
            potential_saving: 0.0,
            status: ActionStatus::Suggested,
            steps: Vec::new(),
            execution_id: None,
            progress: 0,
            current_step: None,
            estimated_completion: None,
            verdict: None,
            started_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Negative amounts are clamped to zero
    pub fn with_potential_saving(mut self, amount: f64) -> Self {
        self.potential_saving = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    pub fn is_in_process(&self) -> bool {
        self.status == ActionStatus::InProcess
    }

    pub fn is_terminal(&self) -> bool {
        self.status == ActionStatus::Completed
    }

    /// Check the status/execution-id invariants
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.progress > 100 {
            return Err(InvariantViolation::ProgressOutOfRange {
                id: self.id.clone(),
                progress: self.progress,
            });
        }
        match self.status {
            ActionStatus::Suggested if self.execution_id.is_some() => Err(
                InvariantViolation::SuggestedWithExecution(self.id.clone()),
            ),
            ActionStatus::Suggested if self.progress != 0 => {
                Err(InvariantViolation::SuggestedWithProgress(self.id.clone()))
            }
            ActionStatus::InProcess if self.execution_id.is_none() => Err(
                InvariantViolation::InProcessWithoutExecution(self.id.clone()),
            ),
            _ => Ok(()),
        }
    }

    /// suggested → in_process with a freshly allocated execution id
    pub fn automate(
        &self,
        execution_id: ExecutionId,
        now: Instant,
    ) -> Result<Action, TransitionError> {
        if self.status != ActionStatus::Suggested {
            return Err(TransitionError::InvalidStatus {
                id: self.id.clone(),
                op: "automate",
                status: self.status,
            });
        }

        Ok(Action {
            status: ActionStatus::InProcess,
            execution_id: Some(execution_id),
            progress: 0,
            current_step: None,
            estimated_completion: None,
            verdict: None,
            started_at: Some(now),
            ..self.clone()
        })
    }

    /// Guard for user cancellation; the caller removes the record
    pub fn ensure_cancellable(&self) -> Result<(), TransitionError> {
        if self.status == ActionStatus::InProcess {
            Ok(())
        } else {
            Err(TransitionError::InvalidStatus {
                id: self.id.clone(),
                op: "cancel",
                status: self.status,
            })
        }
    }

    /// Fold a status snapshot into this action.
    ///
    /// A snapshot reporting less progress than is stored is stale and is
    /// discarded whole, including its steps and status.
    pub fn apply_snapshot(&self, snapshot: &WorkflowStatusSnapshot) -> SnapshotMerge {
        if self.status != ActionStatus::InProcess {
            return SnapshotMerge::NotInProcess(self.status);
        }
        if snapshot.progress < self.progress {
            return SnapshotMerge::Stale {
                stored: self.progress,
                fetched: snapshot.progress,
            };
        }

        let completed = snapshot.engine_status() == EngineStatus::Completed;
        let verdict = validator::validate(self, snapshot);

        let action = Action {
            status: if completed {
                ActionStatus::Completed
            } else {
                ActionStatus::InProcess
            },
            progress: if completed { 100 } else { snapshot.progress },
            current_step: Some(snapshot.current_step.clone()),
            estimated_completion: snapshot.estimated_completion.clone(),
            steps: reconcile_steps(&self.steps, &snapshot.steps),
            verdict: Some(verdict),
            ..self.clone()
        };

        SnapshotMerge::Applied {
            action: Box::new(action),
            completed,
        }
    }

    /// Flag an in-process action whose execution the engine no longer knows.
    ///
    /// Returns `None` when nothing changes: the action is not in process, or
    /// it is already flagged.
    pub fn mark_orphaned(&self) -> Option<Action> {
        if self.status != ActionStatus::InProcess {
            return None;
        }
        let execution_id = self.execution_id.as_ref()?;

        let mut verdict = self
            .verdict
            .clone()
            .unwrap_or_else(|| validator::baseline(self));
        if !verdict.record_orphaned(execution_id) {
            return None;
        }

        Some(Action {
            verdict: Some(verdict),
            ..self.clone()
        })
    }
}

/// Reconcile the locally known steps with the engine's view.
///
/// With matching counts the engine's steps replace ours position by position.
/// Otherwise steps are matched by name (ignoring case): matches take the
/// engine's status, engine steps we have never seen are appended in order,
/// and local steps the engine did not mention are kept. A completed step
/// never goes back to an earlier status.
pub fn reconcile_steps(local: &[Step], remote: &[SnapshotStep]) -> Vec<Step> {
    if remote.is_empty() {
        return local.to_vec();
    }

    if local.len() == remote.len() {
        return local
            .iter()
            .zip(remote)
            .map(|(old, new)| merge_step(Some(old), new))
            .collect();
    }

    let mut merged: Vec<Step> = local.to_vec();
    for new in remote {
        match merged
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(&new.name))
        {
            Some(existing) => *existing = merge_step(Some(&*existing), new),
            None => merged.push(merge_step(None, new)),
        }
    }
    merged
}

fn merge_step(old: Option<&Step>, new: &SnapshotStep) -> Step {
    let status = match old {
        Some(old) if old.status == StepStatus::Completed => StepStatus::Completed,
        _ => new.status,
    };
    let description = match old {
        Some(old) if new.description.is_empty() => old.description.clone(),
        _ => new.description.clone(),
    };
    let name = if new.name.is_empty() {
        old.map(|s| s.name.clone()).unwrap_or_default()
    } else {
        new.name.clone()
    };
    Step {
        name,
        description,
        status,
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
