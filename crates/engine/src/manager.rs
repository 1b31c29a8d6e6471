// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level entry point tying the Store, state machine, and dispatcher
//! together for the CLI front-end.

use crate::dispatcher::Dispatcher;
use crate::error::EngineError;
use jobctl_core::{ExternalId, Job, JobConfig, JobId, SystemClock};
use jobctl_storage::{JobFilter, SharedStore, Store, StoreError};
use tracing::warn;

/// Owns the shared store and a single backend; every CLI command is a thin
/// call into one of these methods.
pub struct Manager {
    store: SharedStore,
    dispatcher: Box<dyn Dispatcher>,
}

impl Manager {
    pub fn new(store: SharedStore, dispatcher: Box<dyn Dispatcher>) -> Self {
        Self { store, dispatcher }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Create a job (and its array elements, if any), wiring up the given
    /// predecessor ids. A predecessor id that no longer exists is logged
    /// and silently dropped rather than failing the whole submission
    /// (spec.md §7, `UnknownJob`).
    pub fn add_job(&self, config: JobConfig, dependency_ids: &[JobId]) -> Result<JobId, EngineError> {
        let job = self.store.lock().create_job(config)?;
        for &waited_for in dependency_ids {
            match self.store.lock().create_edge(job, waited_for) {
                Ok(()) => {}
                Err(StoreError::UnknownJob(_)) => {
                    warn!(%job, %waited_for, "dependency references an unknown job; dropping edge");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(job)
    }

    pub async fn submit(&self, job: JobId) -> Result<ExternalId, EngineError> {
        self.dispatcher.submit(job).await
    }

    pub async fn resubmit(
        &self,
        job_ids: &[JobId],
        failed_only: bool,
        include_running: bool,
    ) -> Result<(), EngineError> {
        self.dispatcher.resubmit(job_ids, failed_only, include_running).await
    }

    pub async fn stop(&self, job_ids: &[JobId]) -> Result<(), EngineError> {
        self.dispatcher.stop(job_ids).await
    }

    pub fn delete(&self, job_ids: &[JobId]) -> Result<(), EngineError> {
        for &job in job_ids {
            self.store.lock().delete_cascade(job)?;
        }
        Ok(())
    }

    pub fn get_job(&self, job: JobId) -> Option<Job> {
        self.store.lock().get_job(job)
    }

    pub fn list(&self, filter: &JobFilter) -> Vec<Job> {
        self.store.lock().list_jobs(filter)
    }

    pub fn checkpoint(&self) -> Result<(), EngineError> {
        self.store.lock().checkpoint(&SystemClock)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
