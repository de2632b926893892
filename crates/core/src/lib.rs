// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

//! ff-core: Core library for the finflow action lifecycle manager
//!
//! This crate provides:
//! - The pure `Action` state machine and snapshot merge rules
//! - The workflow validator and its static per-title profiles
//! - `ActionStore`, the shared feed of actions with change subscriptions
//! - The lifecycle `EventBus`, configuration, and the upstream feed

pub mod clock;
pub mod id;

pub mod action;
pub mod profiles;
pub mod snapshot;
pub mod validator;
pub mod verdict;

pub mod config;
pub mod events;
pub mod feed;
pub mod store;

// Re-exports
pub use action::{
    reconcile_steps, Action, ActionId, ActionStatus, ExecutionId, InvariantViolation,
    SnapshotMerge, Step, StepStatus, TransitionError,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, EngineConfig, FinflowConfig, PollingConfig};
pub use events::{Event, EventBus, EventPattern, EventReceiver, SubscriberId, Subscription};
pub use feed::{Feed, FeedError, QueueFeed, SuggestionFeed};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use snapshot::{EngineStatus, SnapshotStep, WorkflowStatusSnapshot};
pub use store::{ActionStore, StoreChange, StoreReceiver};
pub use validator::validate;
pub use verdict::{RiskLevel, ValidationVerdict};
