// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core error taxonomy (spec.md §7).

use crate::job::JobId;
use crate::status::Status;
use thiserror::Error;

/// An event was rejected because the current status does not allow it.
/// Reported to the caller; never fatal to the process.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("illegal transition for job {job}: {event} is not valid from {from}")]
pub struct IllegalTransition {
    pub job: JobId,
    pub from: Status,
    pub event: &'static str,
}

/// Attempted dependency edge would introduce a cycle.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("adding edge {waiter} -> {waited_for} would close a cycle")]
pub struct CycleError {
    pub waiter: JobId,
    pub waited_for: JobId,
}

/// Reference to a job id absent from the Store.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown job: {0}")]
pub struct UnknownJob(pub JobId);

/// Submission/stop call into the external grid client failed.
#[derive(Debug, Error)]
#[error("backend error: {0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Top-level error returned by core state-machine operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error(transparent)]
    UnknownJob(#[from] UnknownJob),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
