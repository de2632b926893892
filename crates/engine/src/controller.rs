// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-initiated lifecycle transitions
//!
//! `automate` flips the action to `in_process` before the engine has
//! acknowledged anything, then sends the start request in the background.
//! A failed start is logged and published but not rolled back; the
//! scheduler will report the execution as orphaned once the engine
//! answers `NotFound` for it.

use crate::error::LifecycleError;
use ff_adapters::{StartRequest, WorkflowEngine};
use ff_core::{Action, ActionId, ActionStore, Clock, Event, EventBus, ExecutionId, IdGen};
use std::sync::Mutex;
use tokio::task::JoinSet;

pub struct LifecycleController<E, C: Clock, I: IdGen> {
    store: ActionStore,
    bus: EventBus,
    engine: E,
    clock: C,
    id_gen: I,
    user_id: String,
    /// Outstanding start requests
    starts: Mutex<JoinSet<()>>,
}

impl<E, C, I> LifecycleController<E, C, I>
where
    E: WorkflowEngine,
    C: Clock,
    I: IdGen,
{
    pub fn new(
        store: ActionStore,
        bus: EventBus,
        engine: E,
        clock: C,
        id_gen: I,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bus,
            engine,
            clock,
            id_gen,
            user_id: user_id.into(),
            starts: Mutex::new(JoinSet::new()),
        }
    }

    pub fn store(&self) -> &ActionStore {
        &self.store
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Hand a `suggested` action to the engine.
    ///
    /// Must be called from within a Tokio runtime: the start request is
    /// spawned onto it. Returns the new execution id.
    pub fn automate(&self, id: &ActionId) -> Result<ExecutionId, LifecycleError> {
        let execution_id = self.id_gen.next();
        let now = self.clock.now();

        let automated = self
            .store
            .update(id, |current| match current.automate(execution_id.clone(), now) {
                Ok(next) => (Some(next.clone()), Ok(next)),
                Err(e) => (None, Err(e)),
            })
            .ok_or_else(|| LifecycleError::NotFound(id.clone()))??;

        tracing::info!(action_id = %id, execution_id = %execution_id, "action automated");
        self.bus.publish(Event::ActionAutomated {
            id: id.clone(),
            execution_id: execution_id.clone(),
        });

        self.spawn_start(automated);
        Ok(execution_id)
    }

    /// Cancel an `in_process` action by removing it from the store.
    ///
    /// Returns `Ok(false)` if the action is already gone. Any status query
    /// still in flight for it is discarded when it resolves.
    pub fn cancel(&self, id: &ActionId) -> Result<bool, LifecycleError> {
        let removed = match self.store.remove_where(id, |a| a.ensure_cancellable()) {
            None => {
                tracing::debug!(action_id = %id, "cancel: action already gone");
                return Ok(false);
            }
            Some(result) => result?,
        };

        tracing::info!(
            action_id = %id,
            execution_id = ?removed.execution_id.as_ref().map(|e| e.0.as_str()),
            progress = removed.progress,
            "action cancelled"
        );
        self.bus.publish(Event::ActionCancelled {
            action: Box::new(removed),
        });
        Ok(true)
    }

    /// Wait for every start request sent so far
    pub async fn flush_starts(&self) {
        let mut pending = {
            let mut starts = self.starts.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *starts)
        };
        while let Some(result) = pending.join_next().await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "start task did not finish");
            }
        }
    }

    fn spawn_start(&self, action: Action) {
        let Some(execution_id) = action.execution_id.clone() else {
            return;
        };
        let request = StartRequest {
            execution_id,
            user_id: self.user_id.clone(),
            context: serde_json::to_value(&action).unwrap_or_default(),
        };
        let engine = self.engine.clone();
        let bus = self.bus.clone();
        let action_id = action.id;

        let mut starts = self.starts.lock().unwrap_or_else(|e| e.into_inner());
        // Reap finished requests so the set does not grow without bound
        while starts.try_join_next().is_some() {}
        starts.spawn(async move {
            if let Err(e) = engine.start(&request).await {
                tracing::warn!(
                    action_id = %action_id,
                    execution_id = %request.execution_id,
                    error = %e,
                    "engine start failed; action stays in process"
                );
                bus.publish(Event::StartFailed {
                    id: action_id,
                    execution_id: request.execution_id.clone(),
                    reason: e.to_string(),
                });
            }
        });
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
