// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream suggestion feed
//!
//! The feed is consumed, never written back to. A feed file holds the
//! actions shown initially plus a backlog used to replace terminal ones:
//!
//! ```json
//! { "actions": [ { "id": "a-1", "title": "..." } ], "backlog": [] }
//! ```

use crate::action::{Action, ActionId, ActionStatus, InvariantViolation};
use serde::Deserialize;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid feed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed action {id} has status {status}; only suggested actions are accepted")]
    NotSuggested { id: ActionId, status: ActionStatus },
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error("duplicate action id in feed: {0}")]
    DuplicateId(ActionId),
}

/// Source of fresh `suggested` actions
pub trait SuggestionFeed: Send + 'static {
    /// Next suggestion to show in place of `after`, if the feed has one
    fn next_suggestion(&mut self, after: &Action) -> Option<Action>;
}

/// In-memory FIFO feed
#[derive(Debug, Clone, Default)]
pub struct QueueFeed {
    queue: VecDeque<Action>,
}

impl QueueFeed {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl SuggestionFeed for QueueFeed {
    fn next_suggestion(&mut self, after: &Action) -> Option<Action> {
        // Never hand back the action being replaced
        while let Some(next) = self.queue.pop_front() {
            if next.id != after.id {
                return Some(next);
            }
        }
        None
    }
}

/// Parsed feed file
#[derive(Debug, Clone, Default)]
pub struct Feed {
    /// Seeded into the store at startup
    pub actions: Vec<Action>,
    pub backlog: QueueFeed,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FeedFile {
    #[serde(default)]
    actions: Vec<Action>,
    #[serde(default)]
    backlog: Vec<Action>,
}

impl Feed {
    pub fn parse(content: &str) -> Result<Self, FeedError> {
        let file: FeedFile = serde_json::from_str(content)?;

        let mut seen = HashSet::new();
        for action in file.actions.iter().chain(file.backlog.iter()) {
            if action.status != ActionStatus::Suggested {
                return Err(FeedError::NotSuggested {
                    id: action.id.clone(),
                    status: action.status,
                });
            }
            action.check_invariants()?;
            if !seen.insert(action.id.clone()) {
                return Err(FeedError::DuplicateId(action.id.clone()));
            }
        }

        Ok(Self {
            actions: file.actions,
            backlog: QueueFeed::new(file.backlog),
        })
    }

    pub fn load(path: &Path) -> Result<Self, FeedError> {
        let content = std::fs::read_to_string(path).map_err(|source| FeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
