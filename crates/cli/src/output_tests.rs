// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobctl_core::JobConfig;
use jobctl_storage::FileStore;
use tempfile::TempDir;

fn open_store() -> (TempDir, FileStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open");
    (dir, store)
}

#[test]
fn with_element_suffix_appends_to_the_path() {
    let path = std::path::PathBuf::from("/tmp/job.o1");
    assert_eq!(with_element_suffix(path.clone(), Some(3)), std::path::PathBuf::from("/tmp/job.o1.3"));
    assert_eq!(with_element_suffix(path.clone(), None), path);
}

#[test]
fn print_job_list_does_not_panic_on_an_empty_store() {
    let (_dir, store) = open_store();
    print_job_list(&store, &[], false);
}

#[test]
fn print_array_elements_reflects_the_store() {
    let (_dir, mut store) = open_store();
    let spec = jobctl_core::ArraySpec::new(1, 2, 1).unwrap();
    let job_id = store.create_job(JobConfig::builder(vec!["a".into()]).array_spec(spec).build()).unwrap();
    let job = store.get_job(job_id).unwrap();
    print_array_elements(&store, &job);
}
