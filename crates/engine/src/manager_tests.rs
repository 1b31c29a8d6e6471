// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::error::EngineError;
use jobctl_core::ExternalId;
use jobctl_storage::FileStore;
use parking_lot::Mutex as PLMutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingDispatcher {
    submit_calls: AtomicUsize,
    stop_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn submit(&self, job: JobId) -> Result<ExternalId, EngineError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ExternalId(job.0))
    }

    async fn resubmit(
        &self,
        _job_ids: &[JobId],
        _failed_only: bool,
        _include_running: bool,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    async fn stop(&self, job_ids: &[JobId]) -> Result<(), EngineError> {
        self.stop_calls.fetch_add(job_ids.len(), Ordering::SeqCst);
        Ok(())
    }
}

fn manager() -> (TempDir, Manager, Arc<RecordingDispatcher>) {
    let dir = TempDir::new().expect("tempdir");
    let store = Arc::new(PLMutex::new(FileStore::open(dir.path()).expect("open")));
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let manager = Manager::new(store, Box::new(DispatcherRef(dispatcher.clone())));
    (dir, manager, dispatcher)
}

/// Lets the test keep its own `Arc` to assert on call counts while also
/// handing the manager a boxed trait object.
struct DispatcherRef(Arc<RecordingDispatcher>);

#[async_trait::async_trait]
impl Dispatcher for DispatcherRef {
    async fn submit(&self, job: JobId) -> Result<ExternalId, EngineError> {
        self.0.submit(job).await
    }
    async fn resubmit(
        &self,
        job_ids: &[JobId],
        failed_only: bool,
        include_running: bool,
    ) -> Result<(), EngineError> {
        self.0.resubmit(job_ids, failed_only, include_running).await
    }
    async fn stop(&self, job_ids: &[JobId]) -> Result<(), EngineError> {
        self.0.stop(job_ids).await
    }
}

fn config(argv: &[&str]) -> JobConfig {
    JobConfig::builder(argv.iter().map(|s| s.to_string()).collect()).build()
}

#[test]
fn add_job_drops_unknown_dependencies() {
    let (_dir, manager, _dispatcher) = manager();
    let job = manager.add_job(config(&["a"]), &[JobId(999)]).expect("add_job");
    assert!(manager.get_job(job).is_some());
}

#[test]
fn add_job_wires_known_dependencies() {
    let (_dir, manager, _dispatcher) = manager();
    let j1 = manager.add_job(config(&["a"]), &[]).expect("j1");
    let j2 = manager.add_job(config(&["b"]), &[j1]).expect("j2");
    assert_eq!(manager.store().lock().predecessors(j2), vec![j1]);
}

#[tokio::test]
async fn submit_delegates_to_dispatcher() {
    let (_dir, manager, dispatcher) = manager();
    let job = manager.add_job(config(&["a"]), &[]).expect("add_job");
    manager.submit(job).await.expect("submit");
    assert_eq!(dispatcher.submit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stop_delegates_to_dispatcher() {
    let (_dir, manager, dispatcher) = manager();
    let job = manager.add_job(config(&["a"]), &[]).expect("add_job");
    manager.stop(&[job]).await.expect("stop");
    assert_eq!(dispatcher.stop_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn delete_removes_job() {
    let (_dir, manager, _dispatcher) = manager();
    let job = manager.add_job(config(&["a"]), &[]).expect("add_job");
    manager.delete(&[job]).expect("delete");
    assert!(manager.get_job(job).is_none());
}

#[test]
fn list_returns_all_jobs_by_default() {
    let (_dir, manager, _dispatcher) = manager();
    manager.add_job(config(&["a"]), &[]).unwrap();
    manager.add_job(config(&["b"]), &[]).unwrap();
    assert_eq!(manager.list(&JobFilter::all()).len(), 2);
}
