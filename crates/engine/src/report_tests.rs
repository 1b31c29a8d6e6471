// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobctl_core::{ArraySpec, JobId, Status};
use yare::parameterized;

fn job() -> Job {
    Job::builder().unique(7).command(["echo", "hello", "world"]).build()
}

#[test]
fn id_label_is_plain_for_singleton() {
    assert_eq!(id_label(&job()), "7");
}

#[test]
fn id_label_includes_array_range_for_array_jobs() {
    let array_job = Job::builder().unique(7).array_spec(ArraySpec::new(1, 5, 2).unwrap()).build();
    assert_eq!(id_label(&array_job), "7[1-5:2]");
}

#[test]
fn status_label_has_no_suffix_before_terminal() {
    let j = Job::builder().status(Status::Queued).build();
    assert_eq!(status_label(&j), "queued");
}

#[test]
fn status_label_includes_result_once_terminal() {
    let j = Job::builder().status(Status::Success).result(0).build();
    assert_eq!(status_label(&j), "success(0)");
}

#[parameterized(
    fits_exactly = { "echo hi", 7, "echo hi" },
    shorter_than_width = { "echo hi", 20, "echo hi" },
    truncated = { "echo one two three four", 10, "echo on..." },
)]
fn truncate_command_cases(input: &str, width: usize, expected: &str) {
    assert_eq!(truncate_command(input, width), expected);
}

#[test]
fn truncate_command_never_exceeds_max_width() {
    let truncated = truncate_command("a very long command line indeed", 10);
    assert_eq!(truncated.chars().count(), 10);
}

#[test]
fn build_row_displays_dependencies_when_present() {
    let row = build_row(&job(), vec![JobId(1), JobId(2)], 80);
    assert_eq!(row.to_string(), "7\tsubmitted\techo hello world\tdeps=[1,2]");
}

#[test]
fn build_row_omits_deps_suffix_when_empty() {
    let row = build_row(&job(), vec![], 80);
    assert_eq!(row.to_string(), "7\tsubmitted\techo hello world");
}
