// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution id allocation

use crate::action::ExecutionId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Allocates execution ids; every call must return an id never seen before
pub trait IdGen: Clone + Send + Sync + 'static {
    fn next(&self) -> ExecutionId;
}

/// UUID v4 ids for talking to a real engine
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> ExecutionId {
        ExecutionId(uuid::Uuid::new_v4().to_string())
    }
}

/// Predictable ids (`<prefix>-1`, `<prefix>-2`, ...) for tests
#[derive(Clone, Debug)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("exec")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> ExecutionId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        ExecutionId(format!("{}-{}", self.prefix, n))
    }
}
