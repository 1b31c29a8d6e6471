// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobctl-storage: durable, transactional persistence for the job graph —
//! a write-ahead log of [`Record`]s folded into a [`state::MaterializedState`],
//! checkpointed periodically to a [`snapshot::Snapshot`].

pub mod checkpoint;
pub mod error;
pub mod record;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod wal;

pub use checkpoint::Paths;
pub use error::StoreError;
pub use record::{Record, WalEntry};
pub use snapshot::{Snapshot, CURRENT_SNAPSHOT_VERSION};
pub use state::MaterializedState;
pub use store::{FileStore, JobFilter, SharedStore, Store};
pub use wal::Wal;
