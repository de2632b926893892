// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events published on every lifecycle transition

use crate::action::{Action, ActionId, ExecutionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// suggested → in_process
    ActionAutomated {
        id: ActionId,
        execution_id: ExecutionId,
    },
    /// A snapshot was merged
    ActionProgress { id: ActionId, progress: u8 },
    /// in_process → completed; carries the final record
    ActionCompleted { action: Box<Action> },
    /// The user cancelled; carries the record as it was removed
    ActionCancelled { action: Box<Action> },
    /// The engine has no record of the execution
    ActionOrphaned {
        id: ActionId,
        execution_id: ExecutionId,
    },
    /// A new suggestion took the place of a terminal action
    ActionReplaced {
        previous: ActionId,
        replacement: ActionId,
    },
    /// The engine rejected or never received a start request
    StartFailed {
        id: ActionId,
        execution_id: ExecutionId,
        reason: String,
    },
    /// A snapshot arrived behind the stored progress and was dropped
    SnapshotStale {
        id: ActionId,
        stored: u8,
        fetched: u8,
    },
}

impl Event {
    /// Colon-separated name used for pattern routing
    pub fn name(&self) -> &'static str {
        match self {
            Event::ActionAutomated { .. } => "action:automated",
            Event::ActionProgress { .. } => "action:progress",
            Event::ActionCompleted { .. } => "action:completed",
            Event::ActionCancelled { .. } => "action:cancelled",
            Event::ActionOrphaned { .. } => "action:orphaned",
            Event::ActionReplaced { .. } => "action:replaced",
            Event::StartFailed { .. } => "action:start_failed",
            Event::SnapshotStale { .. } => "snapshot:stale",
        }
    }

    pub fn action_id(&self) -> &ActionId {
        match self {
            Event::ActionAutomated { id, .. }
            | Event::ActionProgress { id, .. }
            | Event::ActionOrphaned { id, .. }
            | Event::StartFailed { id, .. }
            | Event::SnapshotStale { id, .. } => id,
            Event::ActionCompleted { action } | Event::ActionCancelled { action } => &action.id,
            Event::ActionReplaced { previous, .. } => previous,
        }
    }

    /// Completed or cancelled: the action will not be polled again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Event::ActionCompleted { .. } | Event::ActionCancelled { .. }
        )
    }
}
