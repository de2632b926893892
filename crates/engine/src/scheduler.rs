// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status polling for in-process actions
//!
//! Every sweep takes an owned snapshot of the `in_process` actions, queries
//! the engine for each (bounded by `max_in_flight`), and merges each result
//! as it arrives. The merge runs inside `ActionStore::update`, so a result
//! for an action cancelled while its query was in flight finds the action
//! gone and is dropped.

use ff_adapters::{StatusError, WorkflowEngine, WorkflowStatusClient};
use ff_core::{
    Action, ActionId, ActionStore, Clock, Event, EventBus, ExecutionId, PollingConfig,
    SnapshotMerge, WorkflowStatusSnapshot,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Semaphore};
use tokio::task::{self, JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// What happened to one status result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Snapshot applied; the action is still running
    Merged { progress: u8 },
    /// Snapshot applied and the engine reports the execution done
    Completed,
    /// Fetched progress was behind the stored value; nothing written
    Stale { stored: u8, fetched: u8 },
    /// The action left the store while its query was in flight
    Removed,
    /// Query failed transiently; retried next sweep
    Transient,
    /// The engine does not know the execution
    Orphaned,
    /// The stored action no longer matches the query (new execution or
    /// no longer in process)
    Skipped,
}

/// Tally of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub polled: usize,
    pub merged: usize,
    pub completed: usize,
    pub stale: usize,
    pub removed: usize,
    pub transient: usize,
    pub orphaned: usize,
    pub skipped: usize,
}

impl SweepReport {
    fn record(&mut self, outcome: &MergeOutcome) {
        match outcome {
            MergeOutcome::Merged { .. } => self.merged += 1,
            MergeOutcome::Completed => self.completed += 1,
            MergeOutcome::Stale { .. } => self.stale += 1,
            MergeOutcome::Removed => self.removed += 1,
            MergeOutcome::Transient => self.transient += 1,
            MergeOutcome::Orphaned => self.orphaned += 1,
            MergeOutcome::Skipped => self.skipped += 1,
        }
    }
}

struct Shared<E, C> {
    store: ActionStore,
    bus: EventBus,
    client: WorkflowStatusClient<E>,
    clock: C,
    interval: Duration,
    /// Bounds concurrent status queries
    permits: Arc<Semaphore>,
}

/// Recurring status sweep over every `in_process` action
pub struct PollingScheduler<E, C> {
    shared: Arc<Shared<E, C>>,
}

impl<E, C> Clone for PollingScheduler<E, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E: WorkflowEngine, C: Clock> PollingScheduler<E, C> {
    pub fn new(
        store: ActionStore,
        bus: EventBus,
        client: WorkflowStatusClient<E>,
        clock: C,
        config: &PollingConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                bus,
                client,
                clock,
                interval: config.interval,
                permits: Arc::new(Semaphore::new(config.max_in_flight.max(1))),
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Run one sweep and wait for every query in it to resolve
    pub async fn tick(&self) -> SweepReport {
        let mut report = SweepReport::default();
        let mut queries = JoinSet::new();

        for (id, execution_id) in self.targets(&mut report, &HashSet::new()) {
            queries.spawn(poll_one(Arc::clone(&self.shared), id, execution_id));
        }

        while let Some(result) = queries.join_next().await {
            match result {
                Ok((_, outcome)) => report.record(&outcome),
                Err(e) => tracing::warn!(error = %e, "status query task failed"),
            }
        }

        tracing::debug!(?report, "sweep finished");
        report
    }

    /// Start the recurring sweep in the background.
    ///
    /// The first sweep runs immediately. An action whose previous query is
    /// still in flight is not queried again until that one resolves.
    /// Dropping the handle stops the loop the same way `stop` does.
    pub fn spawn(&self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler = self.clone();
        let task = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.shared.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut queries: JoinSet<(ActionId, MergeOutcome)> = JoinSet::new();
        // Keyed by task so a failed task still releases its action
        let mut in_flight: HashMap<task::Id, ActionId> = HashMap::new();

        tracing::info!(interval_ms = self.shared.interval.as_millis() as u64, "polling started");

        loop {
            tokio::select! {
                // Fires on `stop` and when the handle is dropped
                _ = shutdown.changed() => break,

                _ = interval.tick() => {
                    let mut report = SweepReport::default();
                    let busy: HashSet<ActionId> = in_flight.values().cloned().collect();
                    for (id, execution_id) in self.targets(&mut report, &busy) {
                        let query = queries.spawn(poll_one(
                            Arc::clone(&self.shared),
                            id.clone(),
                            execution_id,
                        ));
                        in_flight.insert(query.id(), id);
                    }
                    if report.polled > 0 {
                        tracing::trace!(polled = report.polled, in_flight = in_flight.len(), "sweep");
                    }
                }

                Some(result) = queries.join_next_with_id(), if !queries.is_empty() => {
                    match result {
                        Ok((task_id, _)) => {
                            in_flight.remove(&task_id);
                        }
                        Err(e) => {
                            let action_id = in_flight.remove(&e.id());
                            tracing::warn!(
                                action_id = ?action_id.as_ref().map(|id| id.0.as_str()),
                                error = %e,
                                "status query task failed"
                            );
                        }
                    }
                }
            }
        }

        // Aborted queries stop at their await point and never write
        queries.shutdown().await;
        tracing::info!("polling stopped");
    }

    /// In-process actions to query this sweep
    fn targets(
        &self,
        report: &mut SweepReport,
        in_flight: &HashSet<ActionId>,
    ) -> Vec<(ActionId, ExecutionId)> {
        let mut targets = Vec::new();
        for action in self.shared.store.in_process() {
            let Action {
                id, execution_id, ..
            } = action;
            match execution_id {
                Some(execution_id) if !in_flight.contains(&id) => {
                    report.polled += 1;
                    targets.push((id, execution_id));
                }
                Some(_) => {}
                None => {
                    tracing::warn!(action_id = %id, "in-process action has no execution id");
                    report.skipped += 1;
                }
            }
        }
        targets
    }
}

async fn poll_one<E: WorkflowEngine, C: Clock>(
    shared: Arc<Shared<E, C>>,
    id: ActionId,
    execution_id: ExecutionId,
) -> (ActionId, MergeOutcome) {
    let result = {
        let Ok(_permit) = shared.permits.acquire().await else {
            return (id, MergeOutcome::Skipped);
        };
        shared.client.fetch_status(&execution_id).await
    };

    let outcome = merge(&shared, &id, &execution_id, result);
    (id, outcome)
}

/// Write one status result back to the store and publish what changed
fn merge<E, C: Clock>(
    shared: &Shared<E, C>,
    id: &ActionId,
    execution_id: &ExecutionId,
    result: Result<WorkflowStatusSnapshot, StatusError>,
) -> MergeOutcome {
    let merged = match result {
        Ok(snapshot) => shared.store.update(id, |current| {
            if current.execution_id.as_ref() != Some(execution_id) {
                return (None, (MergeOutcome::Skipped, None));
            }
            apply(current, snapshot, &shared.clock)
        }),
        Err(StatusError::Transient(reason)) => {
            tracing::debug!(action_id = %id, %execution_id, %reason, "transient status error");
            return MergeOutcome::Transient;
        }
        Err(StatusError::NotFound(_)) => shared.store.update(id, |current| {
            if current.execution_id.as_ref() != Some(execution_id) || !current.is_in_process() {
                return (None, (MergeOutcome::Skipped, None));
            }
            match current.mark_orphaned() {
                Some(flagged) => (
                    Some(flagged),
                    (
                        MergeOutcome::Orphaned,
                        Some(Event::ActionOrphaned {
                            id: id.clone(),
                            execution_id: execution_id.clone(),
                        }),
                    ),
                ),
                // Already flagged on an earlier sweep
                None => (None, (MergeOutcome::Orphaned, None)),
            }
        }),
    };

    let Some((outcome, event)) = merged else {
        tracing::debug!(action_id = %id, %execution_id, "discarding status for removed action");
        return MergeOutcome::Removed;
    };

    match &outcome {
        MergeOutcome::Completed => {
            tracing::info!(action_id = %id, %execution_id, "action completed")
        }
        MergeOutcome::Stale { stored, fetched } => tracing::debug!(
            action_id = %id,
            stored,
            fetched,
            "discarding stale snapshot"
        ),
        MergeOutcome::Orphaned if event.is_some() => tracing::warn!(
            action_id = %id,
            %execution_id,
            "execution not found by engine"
        ),
        _ => {}
    }

    if let Some(event) = event {
        shared.bus.publish(event);
    }
    outcome
}

fn apply<C: Clock>(
    current: &Action,
    mut snapshot: WorkflowStatusSnapshot,
    clock: &C,
) -> (Option<Action>, (MergeOutcome, Option<Event>)) {
    if snapshot.elapsed_seconds.is_none() {
        if let Some(started_at) = current.started_at {
            snapshot = snapshot.with_elapsed(clock.elapsed_since(started_at));
        }
    }

    match current.apply_snapshot(&snapshot) {
        SnapshotMerge::Applied { action, completed } => {
            let event = if completed {
                Event::ActionCompleted {
                    action: action.clone(),
                }
            } else {
                Event::ActionProgress {
                    id: action.id.clone(),
                    progress: action.progress,
                }
            };
            let outcome = if completed {
                MergeOutcome::Completed
            } else {
                MergeOutcome::Merged {
                    progress: action.progress,
                }
            };
            (Some(*action), (outcome, Some(event)))
        }
        SnapshotMerge::Stale { stored, fetched } => (
            None,
            (
                MergeOutcome::Stale { stored, fetched },
                Some(Event::SnapshotStale {
                    id: current.id.clone(),
                    stored,
                    fetched,
                }),
            ),
        ),
        SnapshotMerge::NotInProcess(_) => (None, (MergeOutcome::Skipped, None)),
    }
}

/// Handle to a running background sweep
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the timer, abort in-flight queries, and wait for the loop to exit
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "polling loop did not exit cleanly");
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
