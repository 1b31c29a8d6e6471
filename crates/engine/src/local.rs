// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local backend: a bounded worker pool that runs jobs in-process via
//! `std::process::Command` (through [`crate::dispatcher::run_one`]).
//! External id always equals internal id.

use crate::dispatcher::{run_one, Dispatcher};
use crate::error::EngineError;
use crate::state_machine;
use async_trait::async_trait;
use jobctl_core::{ExternalId, JobId, Status, UnknownJob};
use jobctl_storage::{JobFilter, SharedStore, Store};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// Runs up to `parallelism` jobs concurrently, each in its own Tokio task.
pub struct LocalBackend {
    store: SharedStore,
    semaphore: Arc<Semaphore>,
}

impl LocalBackend {
    pub fn new(store: SharedStore, parallelism: usize) -> Self {
        Self { store, semaphore: Arc::new(Semaphore::new(parallelism.max(1))) }
    }

    fn spawn(&self, job: JobId, element_index: Option<i64>) {
        spawn_job(self.store.clone(), self.semaphore.clone(), job, element_index);
    }

    /// Spawn every currently `queued` job (optionally restricted to
    /// `job_ids`) that isn't already running. Dependency chains unblocked
    /// along the way are picked up automatically by `submit`/`spawn`'s own
    /// cascade, so this is only needed to reconcile jobs left `queued` by
    /// a restart (the in-process worker tasks died with the old process,
    /// but the Store still records them as runnable). Backs the CLI's
    /// `execute` command. Returns the number of jobs (or array elements)
    /// spawned.
    pub fn run_queued(&self, job_ids: Option<&[JobId]>) -> usize {
        let filter = match job_ids {
            Some(ids) => JobFilter::ids(ids.to_vec()),
            None => JobFilter::all(),
        };
        let jobs = self.store.lock().list_jobs(&filter);

        let mut spawned = 0;
        for job in jobs {
            if job.status != Status::Queued {
                continue;
            }
            let elements = self.store.lock().elements(job.unique);
            if elements.is_empty() {
                self.spawn(job.unique, None);
                spawned += 1;
            } else {
                for element in elements {
                    self.spawn(job.unique, Some(element.index));
                    spawned += 1;
                }
            }
        }
        spawned
    }

    /// [`Self::run_queued`], but blocks until every job it kicked off (and
    /// anything its dependency chain unblocks) reaches a terminal status.
    /// The CLI's `execute` command needs this: unlike `submit`, which
    /// returns as soon as work is scheduled, a process driving its own
    /// local worker pool has nothing keeping it alive once `main` returns.
    pub async fn run_queued_and_wait(&self, job_ids: Option<&[JobId]>) -> usize {
        let filter = match job_ids {
            Some(ids) => JobFilter::ids(ids.to_vec()),
            None => JobFilter::all(),
        };
        let targets: Vec<JobId> = self
            .store
            .lock()
            .list_jobs(&filter)
            .into_iter()
            .filter(|j| j.status == Status::Queued)
            .map(|j| j.unique)
            .collect();

        let spawned = self.run_queued(job_ids);

        loop {
            let all_terminal = targets.iter().all(|&id| {
                self.store.lock().get_job(id).map(|j| j.status.is_terminal()).unwrap_or(true)
            });
            if all_terminal {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        spawned
    }
}

/// Spawn one job (or array element) in its own task. On success, any
/// successor that propagation just moved into `queued` is spawned the same
/// way — this is how a dependency chain keeps running to completion
/// without the caller ever calling back in.
fn spawn_job(store: SharedStore, semaphore: Arc<Semaphore>, job: JobId, element_index: Option<i64>) {
    tokio::spawn(async move {
        let permit = semaphore.acquire_owned().await;
        match run_one(store.clone(), job, element_index).await {
            Ok(newly_queued) => {
                drop(permit);
                spawn_newly_queued(&store, &semaphore, newly_queued);
            }
            Err(err) => {
                drop(permit);
                error!(%job, %err, "local job run failed");
            }
        }
    });
}

fn spawn_newly_queued(store: &SharedStore, semaphore: &Arc<Semaphore>, newly_queued: Vec<JobId>) {
    for successor in newly_queued {
        let elements = store.lock().elements(successor);
        if elements.is_empty() {
            spawn_job(store.clone(), semaphore.clone(), successor, None);
        } else {
            for element in elements {
                spawn_job(store.clone(), semaphore.clone(), successor, Some(element.index));
            }
        }
    }
}

#[async_trait]
impl Dispatcher for LocalBackend {
    async fn submit(&self, job: JobId) -> Result<ExternalId, EngineError> {
        let newly_queued = {
            let mut guard = self.store.lock();
            state_machine::queue(&mut *guard, job, None, None, None)?
        };

        let (status, elements) = {
            let guard = self.store.lock();
            let record = guard.get_job(job).ok_or(UnknownJob(job))?;
            (record.status, guard.elements(job))
        };

        if status == Status::Queued {
            if elements.is_empty() {
                self.spawn(job, None);
            } else {
                for element in elements {
                    self.spawn(job, Some(element.index));
                }
            }
        } else {
            info!(%job, %status, "submitted but not runnable yet (waiting on predecessors)");
        }
        spawn_newly_queued(&self.store, &self.semaphore, newly_queued);

        let guard = self.store.lock();
        Ok(guard.get_job(job).ok_or(UnknownJob(job))?.external_id)
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
        // The local backend has no external process handle to cancel
        // beyond letting the worker task run to completion; best-effort
        // stop is a no-op here, mirrored by the grid backend's real
        // cancellation call.
        for job in job_ids {
            info!(%job, "stop requested for local job (no-op: runs to completion)");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
