// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_job_defaults_external_id_to_unique() {
    let config = JobConfig::builder(vec!["echo".into(), "hi".into()]).build();
    let job = Job::new(JobId(42), config);
    assert_eq!(job.unique, JobId(42));
    assert_eq!(job.external_id, ExternalId(42));
    assert_eq!(job.status, Status::Submitted);
    assert_eq!(job.result, None);
}

#[test]
fn command_line_round_trips_byte_for_byte() {
    let argv = vec!["cp".to_string(), "a b".to_string(), "--flag=x y".to_string()];
    let config = JobConfig::builder(argv.clone()).build();
    let job = Job::new(JobId(1), config);
    assert_eq!(job.get_command_line(), argv.as_slice());
}

#[test]
fn log_paths_are_unset_without_log_dir() {
    let config = JobConfig::builder(vec!["echo".into()]).build();
    let job = Job::new(JobId(1), config);
    assert_eq!(job.stdout_path(), None);
    assert_eq!(job.stderr_path(), None);
}

#[test]
fn log_paths_use_name_or_job_fallback() {
    let config = JobConfig::builder(vec!["echo".into()])
        .log_dir(std::path::PathBuf::from("/tmp/logs"))
        .build();
    let job = Job::new(JobId(7), config);
    assert_eq!(job.stdout_path().expect("path"), std::path::PathBuf::from("/tmp/logs/job.o7"));
    assert_eq!(job.stderr_path().expect("path"), std::path::PathBuf::from("/tmp/logs/job.e7"));

    let named = JobConfig::builder(vec!["echo".into()])
        .log_dir(std::path::PathBuf::from("/tmp/logs"))
        .name("myjob")
        .build();
    let job = Job::new(JobId(8), named);
    assert_eq!(job.stdout_path().expect("path"), std::path::PathBuf::from("/tmp/logs/myjob.o8"));
}

#[test]
fn is_array_reflects_array_spec_presence() {
    let plain = Job::new(JobId(1), JobConfig::builder(vec!["echo".into()]).build());
    assert!(!plain.is_array());

    let spec = ArraySpec::new(1, 3, 1).expect("valid spec");
    let arr = JobConfig::builder(vec!["echo".into()]).array_spec(spec).build();
    let job = Job::new(JobId(2), arr);
    assert!(job.is_array());
}

#[test]
fn builder_defaults_queue_to_local() {
    let config = JobConfig::builder(vec!["echo".into()]).build();
    assert_eq!(config.queue_name, "local");
    assert!(!config.stop_on_failure);
}
