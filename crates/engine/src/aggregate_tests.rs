// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn element(index: i64, status: Status, result: Option<i32>) -> ArrayElement {
    ArrayElement { index, status, result }
}

#[test]
fn none_while_any_element_is_non_terminal() {
    let elements =
        vec![element(1, Status::Success, Some(0)), element(2, Status::Executing, None)];
    assert_eq!(aggregate(&elements), None);
}

#[test]
fn all_success_yields_success_zero() {
    let elements = vec![
        element(1, Status::Success, Some(0)),
        element(2, Status::Success, Some(0)),
        element(3, Status::Success, Some(0)),
    ];
    assert_eq!(aggregate(&elements), Some((Status::Success, 0)));
}

#[parameterized(
    out_of_order = { vec![element(3, Status::Failure, Some(4)), element(1, Status::Success, Some(0)), element(2, Status::Failure, Some(4))] },
    in_order = { vec![element(1, Status::Success, Some(0)), element(2, Status::Failure, Some(4)), element(3, Status::Failure, Some(4))] },
)]
fn lowest_index_non_zero_result_wins(elements: Vec<ArrayElement>) {
    assert_eq!(aggregate(&elements), Some((Status::Failure, 4)));
}

#[test]
fn empty_elements_never_aggregate() {
    assert_eq!(aggregate(&[]), None);
}
