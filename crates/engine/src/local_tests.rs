// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobctl_core::JobConfig;
use jobctl_storage::FileStore;
use parking_lot::Mutex;
use std::time::Duration;
use tempfile::TempDir;

fn shared_store() -> (TempDir, SharedStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open");
    (dir, Arc::new(Mutex::new(store)))
}

async fn wait_for_terminal(store: &SharedStore, job: JobId) -> Status {
    for _ in 0..200 {
        let status = store.lock().get_job(job).expect("job present").status;
        if status.is_terminal() {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job} never reached a terminal status");
}

#[tokio::test]
async fn submit_runs_a_singleton_job_to_success() {
    let (_dir, store) = shared_store();
    let job = {
        let mut guard = store.lock();
        guard.create_job(JobConfig::builder(vec!["true".into()]).build()).unwrap()
    };

    let backend = LocalBackend::new(store.clone(), 2);
    backend.submit(job).await.expect("submit");

    let status = wait_for_terminal(&store, job).await;
    assert_eq!(status, Status::Success);
}

#[tokio::test]
async fn submit_runs_array_elements_concurrently() {
    let (_dir, store) = shared_store();
    let spec = jobctl_core::ArraySpec::new(1, 3, 1).unwrap();
    let job = {
        let mut guard = store.lock();
        guard
            .create_job(JobConfig::builder(vec!["true".into()]).array_spec(spec).build())
            .unwrap()
    };

    let backend = LocalBackend::new(store.clone(), 4);
    backend.submit(job).await.expect("submit");

    let status = wait_for_terminal(&store, job).await;
    assert_eq!(status, Status::Success);
}

#[tokio::test]
async fn failing_command_yields_failure_status() {
    let (_dir, store) = shared_store();
    let job = {
        let mut guard = store.lock();
        guard.create_job(JobConfig::builder(vec!["false".into()]).build()).unwrap()
    };

    let backend = LocalBackend::new(store.clone(), 2);
    backend.submit(job).await.expect("submit");

    let status = wait_for_terminal(&store, job).await;
    assert_eq!(status, Status::Failure);
}

#[tokio::test]
async fn waiting_job_is_not_spawned_until_unblocked() {
    let (_dir, store) = shared_store();
    let (j1, j2) = {
        let mut guard = store.lock();
        let j1 = guard.create_job(JobConfig::builder(vec!["true".into()]).build()).unwrap();
        let j2 = guard.create_job(JobConfig::builder(vec!["true".into()]).build()).unwrap();
        guard.create_edge(j2, j1).unwrap();
        (j1, j2)
    };

    let backend = LocalBackend::new(store.clone(), 2);
    backend.submit(j1).await.expect("submit j1");
    backend.submit(j2).await.expect("submit j2");
    assert_eq!(store.lock().get_job(j2).unwrap().status, Status::Waiting);

    wait_for_terminal(&store, j1).await;
    wait_for_terminal(&store, j2).await;
    assert_eq!(store.lock().get_job(j2).unwrap().status, Status::Success);
}

#[tokio::test]
async fn successor_unblocked_by_a_finish_runs_without_a_second_submit_call() {
    // A chain where j2 only becomes queued as a side effect of j1
    // finishing; nothing ever calls submit()/spawn() on j2 directly.
    let (_dir, store) = shared_store();
    let (j1, j2) = {
        let mut guard = store.lock();
        let j1 = guard.create_job(JobConfig::builder(vec!["true".into()]).build()).unwrap();
        let j2 = guard.create_job(JobConfig::builder(vec!["true".into()]).build()).unwrap();
        guard.create_edge(j2, j1).unwrap();
        (j1, j2)
    };

    let backend = LocalBackend::new(store.clone(), 2);
    backend.submit(j2).await.expect("submit j2");
    backend.submit(j1).await.expect("submit j1");

    assert_eq!(wait_for_terminal(&store, j1).await, Status::Success);
    assert_eq!(wait_for_terminal(&store, j2).await, Status::Success);
}

#[tokio::test]
async fn run_queued_spawns_jobs_left_over_from_a_restart() {
    // Reach `queued` without going through a dispatcher, simulating a job
    // left behind when the process that would have spawned it died.
    let (_dir, store) = shared_store();
    let job = {
        let mut guard = store.lock();
        let job = guard.create_job(JobConfig::builder(vec!["true".into()]).build()).unwrap();
        crate::state_machine::queue(&mut *guard, job, None, None, None).expect("queue");
        job
    };
    assert_eq!(store.lock().get_job(job).unwrap().status, Status::Queued);

    let backend = LocalBackend::new(store.clone(), 2);
    let spawned = backend.run_queued(None);
    assert_eq!(spawned, 1);

    assert_eq!(wait_for_terminal(&store, job).await, Status::Success);
}

#[tokio::test]
async fn run_queued_and_wait_returns_only_once_the_job_is_terminal() {
    let (_dir, store) = shared_store();
    let job = {
        let mut guard = store.lock();
        let job = guard.create_job(JobConfig::builder(vec!["true".into()]).build()).unwrap();
        crate::state_machine::queue(&mut *guard, job, None, None, None).expect("queue");
        job
    };

    let backend = LocalBackend::new(store.clone(), 2);
    backend.run_queued_and_wait(None).await;

    assert_eq!(store.lock().get_job(job).unwrap().status, Status::Success);
}
