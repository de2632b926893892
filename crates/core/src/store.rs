// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action store: the single source of truth for the action feed
//!
//! Every mutation happens under one write lock and produces exactly one
//! `StoreChange` per subscriber. Readers always get owned copies, so no
//! half-applied update is ever observable.

use crate::action::{Action, ActionId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// A single logical change to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Upserted(ActionId),
    Removed(ActionId),
}

impl StoreChange {
    pub fn id(&self) -> &ActionId {
        match self {
            StoreChange::Upserted(id) | StoreChange::Removed(id) => id,
        }
    }
}

/// Receiver for store change notifications
pub type StoreReceiver = mpsc::UnboundedReceiver<StoreChange>;

#[derive(Default)]
struct StoreState {
    /// First-insertion order
    order: Vec<ActionId>,
    actions: HashMap<ActionId, Action>,
    subscribers: Vec<mpsc::UnboundedSender<StoreChange>>,
}

impl StoreState {
    fn notify(&mut self, change: StoreChange) {
        self.subscribers
            .retain(|tx| tx.send(change.clone()).is_ok());
    }

    fn put(&mut self, action: Action) {
        let id = action.id.clone();
        if self.actions.insert(id.clone(), action).is_none() {
            self.order.push(id.clone());
        }
        self.notify(StoreChange::Upserted(id));
    }
}

/// Ordered, shared collection of actions. Clones share the same state.
#[derive(Clone, Default)]
pub struct ActionStore {
    state: Arc<RwLock<StoreState>>,
}

impl ActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store, one notification per action for later subscribers
    pub fn with_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        let store = Self::new();
        store.extend(actions);
        store
    }

    /// Receive a `StoreChange` for every subsequent mutation
    pub fn subscribe(&self) -> StoreReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.subscribers.push(tx);
        rx
    }

    /// All actions in first-insertion order
    pub fn list(&self) -> Vec<Action> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .order
            .iter()
            .filter_map(|id| state.actions.get(id).cloned())
            .collect()
    }

    pub fn get(&self, id: &ActionId) -> Option<Action> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.actions.get(id).cloned()
    }

    pub fn contains(&self, id: &ActionId) -> bool {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.actions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owned copies of every `in_process` action, in store order
    pub fn in_process(&self) -> Vec<Action> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .order
            .iter()
            .filter_map(|id| state.actions.get(id))
            .filter(|a| a.is_in_process())
            .cloned()
            .collect()
    }

    /// Insert or replace by id. A replaced action keeps its position.
    pub fn upsert(&self, action: Action) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.put(action);
    }

    pub fn extend(&self, actions: impl IntoIterator<Item = Action>) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        for action in actions {
            state.put(action);
        }
    }

    /// Remove an action. Removing an unknown id is a no-op and notifies nobody.
    pub fn remove(&self, id: &ActionId) -> Option<Action> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let removed = state.actions.remove(id)?;
        state.order.retain(|existing| existing != id);
        state.notify(StoreChange::Removed(id.clone()));
        Some(removed)
    }

    /// Remove an action only if `check` accepts it, under one lock.
    ///
    /// Returns `None` when the id is not in the store, otherwise the removed
    /// action or the error `check` produced (the store is then unchanged).
    pub fn remove_where<E>(
        &self,
        id: &ActionId,
        check: impl FnOnce(&Action) -> Result<(), E>,
    ) -> Option<Result<Action, E>> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let current = state.actions.get(id)?;
        if let Err(e) = check(current) {
            return Some(Err(e));
        }
        let removed = state.actions.remove(id)?;
        state.order.retain(|existing| existing != id);
        state.notify(StoreChange::Removed(id.clone()));
        Some(Ok(removed))
    }

    /// Atomically read and optionally replace one action.
    ///
    /// `f` sees the current record and returns an optional replacement plus
    /// a value handed back to the caller. Returns `None` without calling `f`
    /// when the id is not in the store. A replacement equal to the current
    /// record is not a change and notifies nobody.
    pub fn update<T>(
        &self,
        id: &ActionId,
        f: impl FnOnce(&Action) -> (Option<Action>, T),
    ) -> Option<T> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let current = state.actions.get(id)?;
        let (replacement, value) = f(current);

        if let Some(mut replacement) = replacement {
            if &replacement != current {
                replacement.id = id.clone();
                state.put(replacement);
            }
        }
        Some(value)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
