// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loads a [`MaterializedState`] from a snapshot plus WAL replay, and
//! writes fresh snapshots back out.

use crate::error::StoreError;
use crate::snapshot::Snapshot;
use crate::state::MaterializedState;
use crate::wal::Wal;
use chrono::{DateTime, Utc};
use jobctl_core::Clock;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The two files backing one Store: the WAL and its companion snapshot.
#[derive(Debug, Clone)]
pub struct Paths {
    pub wal: PathBuf,
    pub snapshot: PathBuf,
}

impl Paths {
    pub fn under(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self { wal: dir.join("jobs.wal"), snapshot: dir.join("jobs.snapshot.json") }
    }
}

/// Load the last snapshot (if any) and replay unprocessed WAL entries on
/// top of it. Returns the rebuilt state and a [`Wal`] positioned at the end
/// of the log, with `processed_seq` equal to `write_seq`.
pub fn load(paths: &Paths) -> Result<(MaterializedState, Wal), StoreError> {
    let snapshot = Snapshot::load(&paths.snapshot)?;
    let (mut state, processed_seq) = match snapshot {
        Some(s) => {
            debug!(seq = s.seq, "loaded snapshot");
            (s.state, s.seq)
        }
        None => {
            debug!("no snapshot present, starting from empty state");
            (MaterializedState::default(), 0)
        }
    };

    let mut wal = Wal::open(&paths.wal, processed_seq)?;
    let pending = wal.next_unprocessed()?;
    let replayed = pending.len();
    for entry in pending {
        state.apply(&entry.record);
        wal.mark_processed(entry.seq);
    }
    if replayed > 0 {
        info!(count = replayed, "replayed WAL entries since last snapshot");
    }
    Ok((state, wal))
}

/// Write a fresh snapshot of `state` at WAL sequence `seq`, rotating the
/// previous snapshot file to `.bak`.
pub fn save(paths: &Paths, state: &MaterializedState, seq: u64, clock: &dyn Clock) -> Result<(), StoreError> {
    let now = DateTime::<Utc>::from_timestamp_millis(clock.epoch_ms() as i64).unwrap_or_else(Utc::now);
    let snapshot = Snapshot::new(seq, state.clone(), now);
    snapshot.save(&paths.snapshot)?;
    info!(seq, "wrote snapshot");
    Ok(())
}
