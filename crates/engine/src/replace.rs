// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Card replacement after terminal transitions
//!
//! Observes `action:completed` and `action:cancelled` on the event bus and
//! pulls a fresh suggestion from the upstream feed for each. The lifecycle
//! core never calls into this module.

use ff_core::{
    Action, ActionId, ActionStore, Event, EventBus, SubscriberId, Subscription, SuggestionFeed,
};
use tokio::task::JoinHandle;

const SUBSCRIBER: &str = "replacement";

pub struct ReplacementPolicy<F> {
    store: ActionStore,
    bus: EventBus,
    feed: F,
}

impl<F: SuggestionFeed> ReplacementPolicy<F> {
    pub fn new(store: ActionStore, bus: EventBus, feed: F) -> Self {
        Self { store, bus, feed }
    }

    /// React to one event. Returns the id of the inserted suggestion.
    pub fn handle(&mut self, event: &Event) -> Option<ActionId> {
        let previous = match event {
            Event::ActionCompleted { action } | Event::ActionCancelled { action } => action,
            _ => return None,
        };

        let next = self.next_fresh(previous)?;
        let replacement = next.id.clone();

        tracing::info!(
            previous = %previous.id,
            replacement = %replacement,
            title = %next.title,
            "replacing action"
        );
        self.store.upsert(next);
        self.bus.publish(Event::ActionReplaced {
            previous: previous.id.clone(),
            replacement: replacement.clone(),
        });
        Some(replacement)
    }

    /// Next suggestion whose id is not already in the store
    fn next_fresh(&mut self, previous: &Action) -> Option<Action> {
        loop {
            let candidate = self.feed.next_suggestion(previous)?;
            if !self.store.contains(&candidate.id) {
                return Some(candidate);
            }
            tracing::debug!(action_id = %candidate.id, "feed suggestion already present, skipping");
        }
    }

    /// Subscribe to terminal events and handle them on a background task
    pub fn spawn(mut self) -> ReplacementHandle<F> {
        let bus = self.bus.clone();
        let mut rx = bus.subscribe(Subscription::new(
            SUBSCRIBER,
            &["action:completed", "action:cancelled"],
        ));

        let task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                self.handle(&event);
            }
            self.feed
        });

        ReplacementHandle { bus, task }
    }
}

/// Running replacement observer
pub struct ReplacementHandle<F> {
    bus: EventBus,
    task: JoinHandle<F>,
}

impl<F> ReplacementHandle<F> {
    /// Unsubscribe, finish any queued events, and hand back the feed
    pub async fn stop(self) -> Option<F> {
        self.bus.unsubscribe(&SubscriberId(SUBSCRIBER.to_string()));
        match self.task.await {
            Ok(feed) => Some(feed),
            Err(e) => {
                tracing::warn!(error = %e, "replacement task did not finish");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "replace_tests.rs"]
mod tests;
