// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grid backend: delegates `submit`/`stop` to an external scheduler client
//! and relies on a per-job wrapper process (invoked by the grid scheduler
//! itself, reading the `JOB_ID`/`SGE_TASK_ID` environment contract) to call
//! back into [`crate::dispatcher::run_one`] via the `run-job` CLI command.

use crate::dispatcher::{backend_error, Dispatcher};
use crate::error::EngineError;
use crate::state_machine;
use async_trait::async_trait;
use jobctl_core::{BackendError, ExternalId, Job, JobId, Status, UnknownJob};
use jobctl_storage::{SharedStore, Store};
use std::path::PathBuf;
use tracing::{info, warn};

/// Minimal surface an external grid scheduler client must provide. Kept
/// separate from [`Dispatcher`] so it can be faked in tests without
/// standing up a real scheduler.
#[async_trait]
pub trait GridClient: Send + Sync {
    /// Submit `job`'s wrapper invocation and return the scheduler-assigned
    /// external id.
    async fn submit(&self, job: &Job, wrapper: &std::path::Path) -> Result<u64, BackendError>;

    /// Cancel a previously submitted external id.
    async fn stop(&self, external_id: u64) -> Result<(), BackendError>;
}

/// `GridClient` that shells out to a real scheduler binary (e.g. `qsub`/
/// `qdel`), passing the wrapper script and array range as arguments.
pub struct SubprocessGridClient {
    pub submit_binary: PathBuf,
    pub stop_binary: PathBuf,
}

#[async_trait]
impl GridClient for SubprocessGridClient {
    async fn submit(&self, job: &Job, wrapper: &std::path::Path) -> Result<u64, BackendError> {
        let mut command = tokio::process::Command::new(&self.submit_binary);
        command.arg(wrapper);
        if let Some(spec) = job.array_spec {
            command.arg("-t").arg(format!("{}-{}:{}", spec.start, spec.stop, spec.step));
        }
        command.arg("-N").arg(job.name.clone().unwrap_or_else(|| "job".to_string()));
        command.arg("-q").arg(&job.queue_name);

        let output = command
            .output()
            .await
            .map_err(|err| backend_error("submitting to grid scheduler", err))?;
        if !output.status.success() {
            return Err(backend_error(
                "grid scheduler submission failed",
                String::from_utf8_lossy(&output.stderr),
            ));
        }
        parse_external_id(&String::from_utf8_lossy(&output.stdout))
    }

    async fn stop(&self, external_id: u64) -> Result<(), BackendError> {
        let output = tokio::process::Command::new(&self.stop_binary)
            .arg(external_id.to_string())
            .output()
            .await
            .map_err(|err| backend_error("stopping grid job", err))?;
        if !output.status.success() {
            return Err(backend_error(
                "grid scheduler stop failed",
                String::from_utf8_lossy(&output.stderr),
            ));
        }
        Ok(())
    }
}

/// Grid schedulers typically print a line like `Your job 4242 ("name")
/// has been submitted`; pull out the first integer token.
fn parse_external_id(stdout: &str) -> Result<u64, BackendError> {
    stdout
        .split_whitespace()
        .find_map(|tok| tok.parse::<u64>().ok())
        .ok_or_else(|| BackendError::new(format!("could not parse job id from: {stdout:?}")))
}

/// Dispatches to an external grid scheduler via a [`GridClient`].
pub struct GridBackend<C: GridClient> {
    store: SharedStore,
    client: C,
    wrapper: PathBuf,
}

impl<C: GridClient> GridBackend<C> {
    pub fn new(store: SharedStore, client: C, wrapper: PathBuf) -> Self {
        Self { store, client, wrapper }
    }

    /// Submit an already-`queued` job (propagation put it there) straight
    /// to the grid client, without re-running `queue()` on it — its status
    /// transition already happened, it just hasn't been handed to the
    /// scheduler yet.
    async fn dispatch_queued(&self, job: JobId) -> Result<(), EngineError> {
        let record = {
            let guard = self.store.lock();
            guard.get_job(job).ok_or(UnknownJob(job))?
        };
        let external_id = self.client.submit(&record, &self.wrapper).await?;
        let mut guard = self.store.lock();
        guard.update_external_id(job, external_id)?;
        Ok(())
    }
}

#[async_trait]
impl<C: GridClient> Dispatcher for GridBackend<C> {
    async fn submit(&self, job: JobId) -> Result<ExternalId, EngineError> {
        let record = {
            let guard = self.store.lock();
            guard.get_job(job).ok_or(UnknownJob(job))?
        };
        let external_id = self.client.submit(&record, &self.wrapper).await?;
        let newly_queued = {
            let mut guard = self.store.lock();
            state_machine::queue(&mut *guard, job, Some(external_id), None, None)?
        };
        for successor in newly_queued {
            self.dispatch_queued(successor).await?;
        }
        Ok(ExternalId(external_id))
    }

    async fn resubmit(
        &self,
        job_ids: &[JobId],
        failed_only: bool,
        include_running: bool,
    ) -> Result<(), EngineError> {
        for &job in job_ids {
            let status = {
                let guard = self.store.lock();
                guard.get_job(job).ok_or(UnknownJob(job))?.status
            };
            if failed_only && status != Status::Failure {
                continue;
            }
            let runnable_already = matches!(status, Status::Queued | Status::Waiting | Status::Executing);
            if runnable_already && !include_running && status != Status::Failure {
                continue;
            }
            if include_running && status == Status::Executing {
                if let Err(err) = self.stop(&[job]).await {
                    warn!(%job, %err, "failed to stop job before resubmitting it");
                }
            }
            {
                let mut guard = self.store.lock();
                state_machine::submit(&mut *guard, job, None)?;
            }
            self.submit(job).await?;
        }
        Ok(())
    }

    async fn stop(&self, job_ids: &[JobId]) -> Result<(), EngineError> {
        for &job in job_ids {
            let external_id = {
                let guard = self.store.lock();
                guard.get_job(job).ok_or(UnknownJob(job))?.external_id
            };
            info!(%job, %external_id, "stopping grid job");
            self.client.stop(external_id.0).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
