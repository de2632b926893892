// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for user-initiated transitions

use ff_core::{ActionId, TransitionError};
use thiserror::Error;

/// Errors a user operation can surface. Engine failures never appear here:
/// they are logged and published as events instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("action not found: {0}")]
    NotFound(ActionId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
