// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    submitted = { Status::Submitted, false },
    queued = { Status::Queued, false },
    waiting = { Status::Waiting, false },
    executing = { Status::Executing, false },
    success = { Status::Success, true },
    failure = { Status::Failure, true },
)]
fn terminal_classification(status: Status, expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[test]
fn default_status_is_submitted() {
    assert_eq!(Status::default(), Status::Submitted);
}

#[test]
fn display_matches_spec_labels() {
    assert_eq!(Status::Submitted.to_string(), "submitted");
    assert_eq!(Status::Queued.to_string(), "queued");
    assert_eq!(Status::Waiting.to_string(), "waiting");
    assert_eq!(Status::Executing.to_string(), "executing");
    assert_eq!(Status::Success.to_string(), "success");
    assert_eq!(Status::Failure.to_string(), "failure");
}

#[test]
fn job_event_round_trips_through_json() {
    let event = JobEvent::Finish { result: 0, element_index: Some(2) };
    let json = serde_json::to_string(&event).expect("serialize");
    let back: JobEvent = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(event, back);
}
