// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors a [`crate::store::Store`] can return.

use crate::snapshot::SnapshotError;
use crate::wal::WalError;
use jobctl_core::{CycleError, UnknownJob};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Wal(#[from] WalError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error(transparent)]
    UnknownJob(#[from] UnknownJob),
    #[error("store at {0} is already locked by another process")]
    Locked(std::path::PathBuf),
}
