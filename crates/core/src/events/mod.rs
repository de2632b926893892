// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle events
//!
//! - `Event` - what happened to an action
//! - `EventBus` - routes events to subscribers by name pattern
//! - `EventPattern` - `action:*`, `action:**`, `**` style matching

mod bus;
mod event;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use event::Event;
pub use subscription::{EventPattern, SubscriberId, Subscription};
