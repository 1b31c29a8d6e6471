// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency edges between jobs.

use crate::job::JobId;
use serde::{Deserialize, Serialize};

/// A directed edge: `waiter` must wait for `waited_for` to reach a terminal
/// state before it may be queued. Duplicates are permitted but idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub waiter: JobId,
    pub waited_for: JobId,
}

impl DependencyEdge {
    pub fn new(waiter: JobId, waited_for: JobId) -> Self {
        Self { waiter, waited_for }
    }
}
