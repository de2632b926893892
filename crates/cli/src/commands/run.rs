// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ff run --feed <json>` - Automate actions and follow them to completion

use crate::output::action_line;
use anyhow::{bail, Context, Result};
use clap::Args;
use ff_adapters::{HttpEngine, TracedEngine, WorkflowStatusClient};
use ff_core::{
    ActionId, ActionStore, EventBus, Feed, FinflowConfig, StoreChange, SystemClock, UuidIdGen,
};
use ff_engine::{LifecycleController, PollingScheduler, ReplacementPolicy};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Feed file: {"actions": [...], "backlog": [...]}
    #[arg(long)]
    pub feed: PathBuf,

    /// Action to automate (repeatable)
    #[arg(long = "automate", value_name = "ID")]
    pub automate: Vec<String>,

    /// Automate every action in the feed
    #[arg(long, conflicts_with = "automate")]
    pub all: bool,
}

pub async fn run(args: RunArgs, config: &FinflowConfig) -> Result<()> {
    let feed = Feed::load(&args.feed)
        .with_context(|| format!("loading feed {}", args.feed.display()))?;

    let store = ActionStore::with_actions(feed.actions);
    let bus = EventBus::new();
    let mut changes = store.subscribe();

    let engine = TracedEngine::new(HttpEngine::new(
        &config.engine.base_url,
        config.engine.request_timeout,
    )?);
    let controller = LifecycleController::new(
        store.clone(),
        bus.clone(),
        engine.clone(),
        SystemClock,
        UuidIdGen,
        config.engine.user_id.clone(),
    );
    let scheduler = PollingScheduler::new(
        store.clone(),
        bus.clone(),
        WorkflowStatusClient::new(engine, config.engine.request_timeout),
        SystemClock,
        &config.polling,
    );
    let replacement = ReplacementPolicy::new(store.clone(), bus.clone(), feed.backlog).spawn();

    for action in store.list() {
        println!("{}", action_line(&action));
    }

    let selected: Vec<ActionId> = if args.all {
        store.list().into_iter().map(|a| a.id).collect()
    } else {
        args.automate.into_iter().map(ActionId).collect()
    };
    if selected.is_empty() {
        bail!("nothing to automate: pass --automate <id> or --all");
    }

    let mut pending: HashSet<ActionId> = HashSet::new();
    for id in selected {
        let execution_id = controller.automate(&id)?;
        tracing::debug!(action_id = %id, %execution_id, "automated from command line");
        pending.insert(id);
    }

    let polling = scheduler.spawn();
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            change = changes.recv() => {
                let Some(change) = change else { break };
                match &change {
                    StoreChange::Upserted(id) => {
                        if let Some(action) = store.get(id) {
                            println!("{}", action_line(&action));
                            if action.is_terminal() {
                                pending.remove(id);
                            }
                        }
                    }
                    StoreChange::Removed(id) => {
                        println!("{:<12} removed", id.0);
                        pending.remove(id);
                    }
                }
                if pending.is_empty() {
                    break;
                }
            }
            _ = &mut interrupt => {
                // Executions keep running on the engine side
                tracing::info!(pending = pending.len(), "interrupted");
                break;
            }
        }
    }

    polling.stop().await;
    controller.flush_starts().await;
    replacement.stop().await;

    for action in store.list() {
        println!("{}", action_line(&action));
    }
    Ok(())
}
