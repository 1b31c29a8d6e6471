// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Array-element outcome aggregation (spec.md §4.2, §9).

use jobctl_core::{ArrayElement, Status};

/// Roll up an array job's elements into a parent `(status, result)` once
/// every element has reached a terminal state, or `None` if some element
/// is still running.
///
/// The parent succeeds iff every element succeeded. Its result is `0` iff
/// every element's result is `0`, otherwise the result of the
/// **lowest-index element with a non-zero result** — not the last one
/// scanned, so reruns that change element ordering can't change which
/// result wins.
pub fn aggregate(elements: &[ArrayElement]) -> Option<(Status, i32)> {
    if elements.is_empty() || !elements.iter().all(|e| e.status.is_terminal()) {
        return None;
    }

    let mut sorted: Vec<&ArrayElement> = elements.iter().collect();
    sorted.sort_by_key(|e| e.index);

    let all_success = sorted.iter().all(|e| e.status == Status::Success);
    let result = sorted
        .iter()
        .find_map(|e| e.result.filter(|r| *r != 0))
        .unwrap_or(0);

    let status = if all_success { Status::Success } else { Status::Failure };
    Some((status, result))
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
