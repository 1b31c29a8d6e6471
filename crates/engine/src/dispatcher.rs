// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The backend dispatcher contract (spec.md §4.4): two interchangeable
//! implementations feed `execute`/`finish` events back into the state
//! machine, one running jobs in-process and one delegating to an external
//! grid scheduler.

use crate::error::EngineError;
use crate::state_machine;
use async_trait::async_trait;
use jobctl_core::{BackendError, ExternalId, JobId, UnknownJob};
use jobctl_storage::SharedStore;
use std::process::Stdio;
use tracing::{info, instrument, warn};

/// Shared contract for the local worker pool and the external grid client.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Assign an external id and arrange for `job` to eventually receive
    /// `execute`/`finish` events.
    async fn submit(&self, job: JobId) -> Result<ExternalId, EngineError>;

    /// Reset and resubmit each job in `job_ids`. `failed_only` restricts to
    /// jobs currently in `failure`; `include_running` additionally allows
    /// jobs in `executing`/`waiting`/`queued` (those are stopped first,
    /// best-effort, before being resubmitted).
    async fn resubmit(
        &self,
        job_ids: &[JobId],
        failed_only: bool,
        include_running: bool,
    ) -> Result<(), EngineError>;

    /// Request cancellation. The manager does not change status itself —
    /// the backend is expected to eventually report a terminal `finish`.
    async fn stop(&self, job_ids: &[JobId]) -> Result<(), EngineError>;
}

/// Run one job (or one array element) to completion: transition it to
/// `executing`, spawn its command, and `finish` with the observed exit
/// code. Invoked by the local worker pool and by the `run-job` CLI command
/// (the grid backend's per-job wrapper entry point).
///
/// Returns any jobs that landed in `queued` along the way (healing a stuck
/// predecessor on `execute`, or unblocking a successor on `finish`) —
/// propagation only updates the Store, so it is up to the caller's
/// dispatcher to actually run or submit them.
#[instrument(skip(store))]
pub async fn run_one(
    store: SharedStore,
    job: JobId,
    element_index: Option<i64>,
) -> Result<Vec<JobId>, EngineError> {
    let mut newly_queued = {
        let mut guard = store.lock();
        state_machine::execute(&mut *guard, job, element_index)?
    };

    let record = {
        let guard = store.lock();
        guard.get_job(job).ok_or(UnknownJob(job))?
    };

    let argv = record.get_command_line();
    let Some((program, args)) = argv.split_first() else {
        let mut guard = store.lock();
        newly_queued.extend(state_machine::finish(&mut *guard, job, -1, element_index)?);
        return Ok(newly_queued);
    };

    let mut command = tokio::process::Command::new(program);
    command.args(args);
    if let Some(path) = stdout_path(&record, element_index) {
        command.stdout(std::fs::File::create(&path).map(Stdio::from).unwrap_or(Stdio::null()));
    }
    if let Some(path) = stderr_path(&record, element_index) {
        command.stderr(std::fs::File::create(&path).map(Stdio::from).unwrap_or(Stdio::null()));
    }

    info!(job = %job, ?element_index, "spawning job command");
    let result = match command.status().await {
        Ok(status) => status.code().unwrap_or(-1),
        Err(err) => {
            warn!(job = %job, %err, "failed to spawn job command");
            -1
        }
    };

    let mut guard = store.lock();
    newly_queued.extend(state_machine::finish(&mut *guard, job, result, element_index)?);
    Ok(newly_queued)
}

fn stdout_path(job: &jobctl_core::Job, element_index: Option<i64>) -> Option<std::path::PathBuf> {
    job.stdout_path().map(|p| with_element_suffix(p, element_index))
}

fn stderr_path(job: &jobctl_core::Job, element_index: Option<i64>) -> Option<std::path::PathBuf> {
    job.stderr_path().map(|p| with_element_suffix(p, element_index))
}

fn with_element_suffix(path: std::path::PathBuf, element_index: Option<i64>) -> std::path::PathBuf {
    match element_index {
        Some(idx) => {
            let mut os = path.into_os_string();
            os.push(format!(".{idx}"));
            os.into()
        }
        None => path,
    }
}

pub(crate) fn backend_error(context: &str, err: impl std::fmt::Display) -> BackendError {
    BackendError::new(format!("{context}: {err}"))
}
