// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job/element status and the transition events that change it.

use crate::error::{CoreError, IllegalTransition};
use crate::job::JobId;
use serde::{Deserialize, Serialize};

/// The six-state status shared by jobs and array elements.
///
/// A status can only leave `Success`/`Failure` via an explicit `submit()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Submitted,
    Queued,
    Waiting,
    Executing,
    Success,
    Failure,
}

crate::simple_display! {
    Status {
        Submitted => "submitted",
        Queued => "queued",
        Waiting => "waiting",
        Executing => "executing",
        Success => "success",
        Failure => "failure",
    }
}

impl Status {
    /// Terminal statuses are `Success` and `Failure`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Success | Status::Failure)
    }

    /// Check that `self` is one of `allowed`, the way the engine's state
    /// machine validates a job/element transition before committing it.
    pub fn require(self, job: JobId, event: &'static str, allowed: &[Status]) -> Result<(), CoreError> {
        if allowed.contains(&self) {
            Ok(())
        } else {
            Err(IllegalTransition { job, from: self, event }.into())
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Submitted
    }
}

/// An event submitted to the state machine for a single job.
///
/// Mirrors spec.md §4.2: `submit`, `queue`, `execute`, `finish`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobEvent {
    /// Reset to `submitted`; accepted from any state.
    Submit { new_queue: Option<String> },
    /// Compute `queued`/`waiting`/`failure` from predecessor state.
    Queue {
        new_external_id: Option<u64>,
        new_name: Option<String>,
        new_queue: Option<String>,
    },
    /// Move (an element of) the job to `executing`.
    Execute { element_index: Option<i64> },
    /// Record a terminal result for (an element of) the job.
    Finish { result: i32, element_index: Option<i64> },
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
