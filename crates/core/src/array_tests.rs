// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    count_only = { "5", ArraySpec { start: 1, stop: 5, step: 1 } },
    range = { "2-6", ArraySpec { start: 2, stop: 6, step: 1 } },
    range_with_step = { "2-10:3", ArraySpec { start: 2, stop: 10, step: 3 } },
    whitespace = { "  4  ", ArraySpec { start: 1, stop: 4, step: 1 } },
)]
fn parses_front_end_syntax(input: &str, expected: ArraySpec) {
    assert_eq!(ArraySpec::parse(input).expect("parse"), expected);
}

#[test]
fn rejects_empty_spec() {
    assert_eq!(ArraySpec::parse(""), Err(ArraySpecError::Empty));
}

#[test]
fn rejects_start_after_stop() {
    let err = ArraySpec::parse("10-2").expect_err("should fail");
    assert_eq!(err, ArraySpecError::StartAfterStop { start: 10, stop: 2 });
}

#[test]
fn rejects_zero_step() {
    let err = ArraySpec::parse("1-10:0").expect_err("should fail");
    assert_eq!(err, ArraySpecError::NonPositiveStep(0));
}

#[test]
fn rejects_non_integer() {
    assert!(matches!(ArraySpec::parse("abc"), Err(ArraySpecError::InvalidInt(_))));
}

#[test]
fn indices_follow_the_progression_exactly() {
    let spec = ArraySpec::new(2, 10, 3).expect("valid spec");
    let indices: Vec<i64> = spec.indices().collect();
    assert_eq!(indices, vec![2, 5, 8]);
    assert_eq!(spec.len(), 3);
}

#[test]
fn single_element_progression() {
    let spec = ArraySpec::new(7, 7, 1).expect("valid spec");
    assert_eq!(spec.indices().collect::<Vec<_>>(), vec![7]);
}

#[test]
fn display_uses_bracketed_range_notation() {
    let spec = ArraySpec::new(1, 3, 1).expect("valid spec");
    assert_eq!(spec.to_string(), "[1-3:1]");
}

#[test]
fn array_element_starts_submitted_with_no_result() {
    let elem = ArrayElement::new(4);
    assert_eq!(elem.index, 4);
    assert_eq!(elem.status, Status::Submitted);
    assert_eq!(elem.result, None);
}
