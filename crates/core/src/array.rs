// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Array job specification and per-index element records.

use crate::status::Status;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors parsing an array spec string (`"N"`, `"A-B"`, `"A-B:S"`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArraySpecError {
    #[error("empty array spec")]
    Empty,
    #[error("invalid integer in array spec: {0:?}")]
    InvalidInt(String),
    #[error("array spec start ({start}) must be <= stop ({stop})")]
    StartAfterStop { start: i64, stop: i64 },
    #[error("array spec step must be >= 1, got {0}")]
    NonPositiveStep(i64),
}

/// The inclusive arithmetic progression `(start, stop, step)` for an array
/// job, with `start <= stop` and `step >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArraySpec {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl ArraySpec {
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self, ArraySpecError> {
        if start > stop {
            return Err(ArraySpecError::StartAfterStop { start, stop });
        }
        if step < 1 {
            return Err(ArraySpecError::NonPositiveStep(step));
        }
        Ok(Self { start, stop, step })
    }

    /// Parse the front-end array spec syntax:
    /// `"N"` -> (1, N, 1); `"A-B"` -> (A, B, 1); `"A-B:S"` -> (A, B, S).
    pub fn parse(s: &str) -> Result<Self, ArraySpecError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ArraySpecError::Empty);
        }

        let parse_int = |t: &str| -> Result<i64, ArraySpecError> {
            t.trim()
                .parse::<i64>()
                .map_err(|_| ArraySpecError::InvalidInt(t.to_string()))
        };

        match s.find('-') {
            None => {
                let stop = parse_int(s)?;
                Self::new(1, stop, 1)
            }
            Some(dash) => {
                let start = parse_int(&s[..dash])?;
                let rest = &s[dash + 1..];
                match rest.find(':') {
                    None => {
                        let stop = parse_int(rest)?;
                        Self::new(start, stop, 1)
                    }
                    Some(colon) => {
                        let stop = parse_int(&rest[..colon])?;
                        let step = parse_int(&rest[colon + 1..])?;
                        Self::new(start, stop, step)
                    }
                }
            }
        }
    }

    /// The indices this spec produces, in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = i64> + '_ {
        let mut i = self.start;
        std::iter::from_fn(move || {
            if i > self.stop {
                None
            } else {
                let cur = i;
                i += self.step;
                Some(cur)
            }
        })
    }

    pub fn len(&self) -> usize {
        ((self.stop - self.start) / self.step + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false // start <= stop is an invariant, so there is always >= 1 index
    }
}

impl std::fmt::Display for ArraySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}-{}:{}]", self.start, self.stop, self.step)
    }
}

/// One element of an array job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayElement {
    pub index: i64,
    pub status: Status,
    pub result: Option<i32>,
}

impl ArrayElement {
    pub fn new(index: i64) -> Self {
        Self { index, status: Status::Submitted, result: None }
    }
}

#[cfg(test)]
#[path = "array_tests.rs"]
mod tests;
