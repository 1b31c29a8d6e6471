// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reverse-edge walk triggered whenever a job reaches a terminal status
//! (spec.md §4.3). Termination is guaranteed because the dependency graph
//! is acyclic and each visited node either advances toward a terminal
//! status or is left unchanged.

use crate::error::EngineError;
use crate::state_machine::evaluate_target_status;
use jobctl_core::{JobId, Status};
use jobctl_storage::Store;
use tracing::debug;

/// Re-evaluate every successor of `job` now that `job` has reached a
/// terminal status. Returns every job that landed in `queued` as a result
/// (directly or through a further cascade) so the caller's dispatcher can
/// actually run them — propagation only updates the Store, it never spawns
/// anything itself.
pub fn propagate(store: &mut dyn Store, job: JobId) -> Result<Vec<JobId>, EngineError> {
    let mut newly_queued = Vec::new();
    for successor in store.successors(job) {
        reevaluate(store, successor, &mut newly_queued)?;
    }
    Ok(newly_queued)
}

fn reevaluate(store: &mut dyn Store, job: JobId, newly_queued: &mut Vec<JobId>) -> Result<(), EngineError> {
    let Some(existing) = store.get_job(job) else { return Ok(()) };

    let target = match existing.status {
        Status::Waiting | Status::Queued => {
            evaluate_target_status(store, job, existing.stop_on_failure)?
        }
        _ => return Ok(()),
    };

    if target == existing.status {
        return Ok(());
    }

    debug!(job = %job, from = %existing.status, to = %target, "propagated");
    store.update_status(job, None, target, None)?;

    if target == Status::Queued {
        newly_queued.push(job);
    }
    if target.is_terminal() {
        newly_queued.extend(propagate(store, job)?);
    }
    Ok(())
}

#[cfg(test)]
#[path = "propagator_tests.rs"]
mod tests;
