// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job/array-element transition logic (spec.md §4.2): `submit`,
//! `queue`, `execute`, `finish`. Each event reads the current state,
//! decides the next status, and commits it as one atomic Store call.

use crate::aggregate::aggregate;
use crate::error::EngineError;
use crate::propagator::propagate;
use jobctl_core::{IllegalTransition, JobId, Status, UnknownJob};
use jobctl_storage::{Record, Store};
use tracing::{debug, instrument};

/// Reset a job (and all its array elements) to `submitted`. Accepted from
/// any status.
#[instrument(skip(store))]
pub fn submit(store: &mut dyn Store, job: JobId, new_queue: Option<String>) -> Result<(), EngineError> {
    let existing = store.get_job(job).ok_or(UnknownJob(job))?;

    let mut records = vec![Record::UpdateStatus {
        job,
        element_index: None,
        status: Status::Submitted,
        result: None,
    }];
    for element in store.elements(job) {
        records.push(Record::UpdateStatus {
            job,
            element_index: Some(element.index),
            status: Status::Submitted,
            result: None,
        });
    }
    if let Some(queue_name) = new_queue {
        records.push(Record::UpdateQueue { job, queue_name });
    }

    debug!(from = %existing.status, "submit");
    store.apply_batch(records)?;
    Ok(())
}

/// Move a `submitted` job to `queued`, `waiting`, or `failure` depending on
/// its predecessors, then re-evaluate any successor still sitting in
/// `queued` on a now-stale view of its own predecessors.
///
/// Returns any jobs that landed in `queued` as a side effect (only
/// possible if `job` itself went straight to `failure` via
/// `stop_on_failure` and that cascaded through the propagator) — the
/// caller's dispatcher is responsible for actually running them.
#[instrument(skip(store))]
pub fn queue(
    store: &mut dyn Store,
    job: JobId,
    new_external_id: Option<u64>,
    new_name: Option<String>,
    new_queue: Option<String>,
) -> Result<Vec<JobId>, EngineError> {
    let existing = store.get_job(job).ok_or(UnknownJob(job))?;
    existing.status.require(job, "queue", &[Status::Submitted])?;

    let mut records = Vec::new();
    if let Some(external_id) = new_external_id {
        records.push(Record::UpdateExternalId { job, external_id });
    }
    if let Some(name) = new_name {
        records.push(Record::UpdateName { job, name: Some(name) });
    }
    if let Some(queue_name) = new_queue {
        records.push(Record::UpdateQueue { job, queue_name });
    }

    let target = evaluate_target_status(store, job, existing.stop_on_failure)?;
    records.push(Record::UpdateStatus { job, element_index: None, status: target, result: None });
    store.apply_batch(records)?;

    for successor in store.successors(job) {
        if let Some(s) = store.get_job(successor) {
            if s.status == Status::Queued {
                let new_target = evaluate_target_status(store, successor, s.stop_on_failure)?;
                if new_target != Status::Queued {
                    store.update_status(successor, None, new_target, None)?;
                }
            }
        }
    }

    if target.is_terminal() {
        return propagate(store, job);
    }
    Ok(Vec::new())
}

/// Move (an element of) a job to `executing`. Heals a predecessor stuck in
/// `executing` with a terminal element first (lost-finish recovery); any
/// jobs that healing unblocks into `queued` are returned alongside the
/// usual `()` success so the caller can dispatch them.
#[instrument(skip(store))]
pub fn execute(
    store: &mut dyn Store,
    job: JobId,
    element_index: Option<i64>,
) -> Result<Vec<JobId>, EngineError> {
    // Healing may itself queue `job` (this very call is about to execute
    // it), so drop it from what we hand back to the caller.
    let newly_queued: Vec<JobId> =
        heal_stuck_predecessors(store, job)?.into_iter().filter(|&j| j != job).collect();

    let existing = store.get_job(job).ok_or(UnknownJob(job))?;
    match element_index {
        Some(idx) => {
            let elements = store.elements(job);
            let element = elements
                .iter()
                .find(|e| e.index == idx)
                .ok_or_else(|| IllegalTransition { job, from: existing.status, event: "execute" })?;
            element.status.require(job, "execute", &[Status::Queued, Status::Submitted])?;
            store.update_status(job, Some(idx), Status::Executing, None)?;
        }
        None => {
            existing.status.require(job, "execute", &[Status::Queued])?;
            store.update_status(job, None, Status::Executing, None)?;
        }
    }
    Ok(newly_queued)
}

/// Record a terminal result for (an element of) a job, aggregating array
/// elements into the parent once all are terminal, then propagate to
/// successors if the job just became terminal. Returns any successors that
/// landed in `queued` as a result, for the caller's dispatcher to run.
#[instrument(skip(store))]
pub fn finish(
    store: &mut dyn Store,
    job: JobId,
    result: i32,
    element_index: Option<i64>,
) -> Result<Vec<JobId>, EngineError> {
    let existing = store.get_job(job).ok_or(UnknownJob(job))?;

    let became_terminal = match element_index {
        Some(idx) => {
            let element_status = if result == 0 { Status::Success } else { Status::Failure };
            store.update_status(job, Some(idx), element_status, Some(result))?;

            let elements = store.elements(job);
            match aggregate(&elements) {
                Some((parent_status, parent_result)) => {
                    store.update_status(job, None, parent_status, Some(parent_result))?;
                    true
                }
                None => false,
            }
        }
        None => {
            existing.status.require(job, "finish", &[Status::Executing])?;
            let status = if result == 0 { Status::Success } else { Status::Failure };
            store.update_status(job, None, status, Some(result))?;
            true
        }
    };

    if became_terminal {
        return propagate(store, job);
    }
    Ok(Vec::new())
}

/// Compute what `job`'s status should be, given its predecessors' current
/// statuses and its own `stop_on_failure` policy (spec.md §4.2 `queue`).
pub(crate) fn evaluate_target_status(
    store: &dyn Store,
    job: JobId,
    stop_on_failure: bool,
) -> Result<Status, EngineError> {
    let predecessors = store.predecessors(job);
    let mut non_terminal = false;
    let mut any_failed = false;
    for pred in &predecessors {
        let p = store.get_job(*pred).ok_or(UnknownJob(*pred))?;
        if !p.status.is_terminal() {
            non_terminal = true;
        }
        if p.status == Status::Failure {
            any_failed = true;
        }
    }

    Ok(if stop_on_failure && any_failed {
        Status::Failure
    } else if non_terminal {
        Status::Waiting
    } else {
        Status::Queued
    })
}

/// A predecessor stuck in `executing` while one of its elements has
/// already gone terminal is a lost `finish`. Force it to a sentinel
/// failure so the dependency chain can unblock (spec.md §4.2, §8
/// scenario 6).
fn heal_stuck_predecessors(store: &mut dyn Store, job: JobId) -> Result<Vec<JobId>, EngineError> {
    let mut newly_queued = Vec::new();
    for pred in store.predecessors(job) {
        let Some(p) = store.get_job(pred) else { continue };
        if p.status != Status::Executing || !p.is_array() {
            continue;
        }
        let elements = store.elements(pred);
        if elements.iter().any(|e| e.status.is_terminal()) {
            tracing::warn!(job = %pred, "healing lost finish on stuck predecessor");
            store.update_status(pred, None, Status::Failure, Some(-1))?;
            newly_queued.extend(propagate(store, pred)?);
        }
    }
    Ok(newly_queued)
}

#[cfg(test)]
#[path = "state_machine_tests.rs"]
mod tests;
