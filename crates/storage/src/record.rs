// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The WAL's unit of durability: one fact about the job graph.

use jobctl_core::{Job, JobId, Status};
use serde::{Deserialize, Serialize};

/// A single durable fact. Appending one of these to the [`crate::wal::Wal`]
/// and folding it into [`crate::state::MaterializedState`] is the Store's
/// only commit path — nothing is visible to readers until both have
/// happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    CreateJob { job: Box<Job> },
    CreateArrayElement { job: JobId, index: i64 },
    CreateEdge { waiter: JobId, waited_for: JobId },
    UpdateStatus {
        job: JobId,
        element_index: Option<i64>,
        status: Status,
        result: Option<i32>,
    },
    UpdateExternalId { job: JobId, external_id: u64 },
    UpdateName { job: JobId, name: Option<String> },
    UpdateQueue { job: JobId, queue_name: String },
    DeleteCascade { job: JobId },
}

/// A record tagged with its WAL sequence number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalEntry {
    pub seq: u64,
    pub record: Record,
}
