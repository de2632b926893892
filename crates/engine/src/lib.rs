// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! finflow lifecycle engine: user transitions, status polling, and card
//! replacement, all writing through one `ActionStore`

mod controller;
mod error;
mod replace;
mod scheduler;

pub use controller::LifecycleController;
pub use error::LifecycleError;
pub use replace::{ReplacementHandle, ReplacementPolicy};
pub use scheduler::{MergeOutcome, PollingScheduler, SchedulerHandle, SweepReport};
