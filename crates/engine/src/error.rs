// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the state machine, propagator, and dispatcher.

use jobctl_core::{BackendError, CoreError, CycleError, IllegalTransition, UnknownJob};
use jobctl_storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error(transparent)]
    UnknownJob(#[from] UnknownJob),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Core(#[from] CoreError),
}
