// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The transactional persistence surface (spec.md §4.1): durable multi-
//! record commits over a [`Wal`] + [`MaterializedState`], with a snapshot
//! taken on `checkpoint`.

use crate::checkpoint::{self, Paths};
use crate::error::StoreError;
use crate::record::Record;
use crate::state::MaterializedState;
use crate::wal::Wal;
use jobctl_core::{ArrayElement, Clock, CycleError, Job, JobConfig, JobId, Status, UnknownJob};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Selects a subset of jobs from [`Store::list_jobs`]. An empty `ids` means
/// "all jobs"; engine/CLI layers apply any further status filtering.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub ids: Option<Vec<JobId>>,
}

impl JobFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn ids(ids: Vec<JobId>) -> Self {
        Self { ids: Some(ids) }
    }

    fn matches(&self, id: JobId) -> bool {
        match &self.ids {
            Some(ids) => ids.contains(&id),
            None => true,
        }
    }
}

/// Durable, transactional persistence for the job graph. A single call
/// (`create_job`, `update_status`, ...) commits atomically: the WAL append
/// happens first, then the in-memory state is folded forward, so readers
/// never observe a partial record.
pub trait Store {
    fn create_job(&mut self, config: JobConfig) -> Result<JobId, StoreError>;
    fn create_array_element(&mut self, parent: JobId, index: i64) -> Result<(), StoreError>;
    fn create_edge(&mut self, waiter: JobId, waited_for: JobId) -> Result<(), StoreError>;
    fn get_job(&self, id: JobId) -> Option<Job>;
    fn get_job_by_external(&self, external_id: u64) -> Option<Job>;
    fn list_jobs(&self, filter: &JobFilter) -> Vec<Job>;
    fn elements(&self, job: JobId) -> Vec<ArrayElement>;
    fn update_status(
        &mut self,
        job: JobId,
        element_index: Option<i64>,
        status: Status,
        result: Option<i32>,
    ) -> Result<(), StoreError>;
    fn update_external_id(&mut self, job: JobId, external_id: u64) -> Result<(), StoreError>;
    fn update_name(&mut self, job: JobId, name: Option<String>) -> Result<(), StoreError>;
    fn update_queue(&mut self, job: JobId, queue_name: String) -> Result<(), StoreError>;
    fn predecessors(&self, job: JobId) -> Vec<JobId>;
    fn successors(&self, job: JobId) -> Vec<JobId>;
    fn delete_cascade(&mut self, job: JobId) -> Result<(), StoreError>;

    /// Commit every record in `records` as a single transaction: all are
    /// WAL-appended, flushed, and folded into state together. Used by the
    /// engine's state machine/propagator so that an originating event and
    /// its cascading effects become visible atomically.
    fn apply_batch(&mut self, records: Vec<Record>) -> Result<(), StoreError>;

    fn checkpoint(&mut self, clock: &dyn Clock) -> Result<(), StoreError>;
}

/// A `Store` backed by a directory holding a WAL file and a snapshot file.
/// Enforces single-writer access with a `.lock` file for the lifetime of
/// the process holding it.
pub struct FileStore {
    paths: Paths,
    wal: Wal,
    state: MaterializedState,
    lock: LockFile,
}

struct LockFile {
    path: PathBuf,
}

impl LockFile {
    fn acquire(dir: &std::path::Path) -> Result<Self, StoreError> {
        let path = dir.join(".jobctl.lock");
        File::options().write(true).create_new(true).open(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                StoreError::Locked(path.clone())
            } else {
                StoreError::Wal(err.into())
            }
        })?;
        Ok(Self { path })
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

impl FileStore {
    /// Open (or create) a store rooted at `dir`: acquires the writer lock,
    /// loads the last snapshot, and replays the WAL forward from there.
    pub fn open(dir: impl AsRef<std::path::Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|err| StoreError::Wal(err.into()))?;
        let lock = LockFile::acquire(dir)?;
        let paths = Paths::under(dir);
        let (state, wal) = checkpoint::load(&paths)?;
        info!(jobs = state.jobs.len(), "store opened");
        Ok(Self { paths, wal, state, lock })
    }

    fn commit(&mut self, records: Vec<Record>) -> Result<(), StoreError> {
        let mut seqs = Vec::with_capacity(records.len());
        for record in &records {
            seqs.push(self.wal.append(record)?);
        }
        self.wal.flush()?;
        for (record, seq) in records.iter().zip(seqs) {
            self.state.apply(record);
            self.wal.mark_processed(seq);
        }
        Ok(())
    }
}

impl Store for FileStore {
    fn create_job(&mut self, config: JobConfig) -> Result<JobId, StoreError> {
        let unique = self.state.next_job_id();
        let job = Job::new(unique, config);
        let array_indices: Vec<i64> = job.array_spec.map(|s| s.indices().collect()).unwrap_or_default();

        let mut records = vec![Record::CreateJob { job: Box::new(job) }];
        records.extend(
            array_indices.into_iter().map(|index| Record::CreateArrayElement { job: unique, index }),
        );
        self.commit(records)?;
        Ok(unique)
    }

    fn create_array_element(&mut self, parent: JobId, index: i64) -> Result<(), StoreError> {
        if !self.state.jobs.contains_key(&parent) {
            return Err(StoreError::UnknownJob(UnknownJob(parent)));
        }
        self.commit(vec![Record::CreateArrayElement { job: parent, index }])
    }

    fn create_edge(&mut self, waiter: JobId, waited_for: JobId) -> Result<(), StoreError> {
        if !self.state.jobs.contains_key(&waiter) {
            return Err(StoreError::UnknownJob(UnknownJob(waiter)));
        }
        if !self.state.jobs.contains_key(&waited_for) {
            warn!(?waited_for, "dependency references an unknown job, dropping edge");
            return Err(StoreError::UnknownJob(UnknownJob(waited_for)));
        }
        if self.state.would_cycle(waiter, waited_for) {
            return Err(StoreError::Cycle(CycleError { waiter, waited_for }));
        }
        self.commit(vec![Record::CreateEdge { waiter, waited_for }])
    }

    fn get_job(&self, id: JobId) -> Option<Job> {
        self.state.get_job(id).cloned()
    }

    fn get_job_by_external(&self, external_id: u64) -> Option<Job> {
        self.state.get_job_by_external(external_id).cloned()
    }

    fn list_jobs(&self, filter: &JobFilter) -> Vec<Job> {
        let mut jobs: Vec<Job> =
            self.state.jobs.values().filter(|j| filter.matches(j.unique)).cloned().collect();
        jobs.sort_by_key(|j| j.unique);
        jobs
    }

    fn elements(&self, job: JobId) -> Vec<ArrayElement> {
        self.state.elements(job).to_vec()
    }

    fn update_status(
        &mut self,
        job: JobId,
        element_index: Option<i64>,
        status: Status,
        result: Option<i32>,
    ) -> Result<(), StoreError> {
        if !self.state.jobs.contains_key(&job) {
            return Err(StoreError::UnknownJob(UnknownJob(job)));
        }
        self.commit(vec![Record::UpdateStatus { job, element_index, status, result }])
    }

    fn update_external_id(&mut self, job: JobId, external_id: u64) -> Result<(), StoreError> {
        if !self.state.jobs.contains_key(&job) {
            return Err(StoreError::UnknownJob(UnknownJob(job)));
        }
        self.commit(vec![Record::UpdateExternalId { job, external_id }])
    }

    fn update_name(&mut self, job: JobId, name: Option<String>) -> Result<(), StoreError> {
        if !self.state.jobs.contains_key(&job) {
            return Err(StoreError::UnknownJob(UnknownJob(job)));
        }
        self.commit(vec![Record::UpdateName { job, name }])
    }

    fn update_queue(&mut self, job: JobId, queue_name: String) -> Result<(), StoreError> {
        if !self.state.jobs.contains_key(&job) {
            return Err(StoreError::UnknownJob(UnknownJob(job)));
        }
        self.commit(vec![Record::UpdateQueue { job, queue_name }])
    }

    fn predecessors(&self, job: JobId) -> Vec<JobId> {
        self.state.predecessors(job)
    }

    fn successors(&self, job: JobId) -> Vec<JobId> {
        self.state.successors(job)
    }

    fn delete_cascade(&mut self, job: JobId) -> Result<(), StoreError> {
        if !self.state.jobs.contains_key(&job) {
            return Err(StoreError::UnknownJob(UnknownJob(job)));
        }
        self.commit(vec![Record::DeleteCascade { job }])
    }

    fn apply_batch(&mut self, records: Vec<Record>) -> Result<(), StoreError> {
        self.commit(records)
    }

    fn checkpoint(&mut self, clock: &dyn Clock) -> Result<(), StoreError> {
        checkpoint::save(&self.paths, &self.state, self.wal.processed_seq(), clock)
    }
}

/// A [`FileStore`] shared across the local worker pool's threads.
pub type SharedStore = Arc<Mutex<FileStore>>;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
