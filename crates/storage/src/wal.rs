// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only write-ahead log of [`Record`]s.
//!
//! One line of JSON per entry, each tagged with a strictly increasing
//! sequence number. `processed_seq` tracks how far a [`crate::state::MaterializedState`]
//! has folded the log forward; replay after a crash starts from a
//! [`crate::snapshot::Snapshot`]'s `seq` and walks [`Wal::next_unprocessed`].

use crate::record::{Record, WalEntry};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An append-only, sequence-numbered log backing one Store.
pub struct Wal {
    path: PathBuf,
    writer: BufWriter<File>,
    write_seq: u64,
    processed_seq: u64,
}

impl Wal {
    /// Open (creating if absent) the WAL at `path`. `processed_seq` is the
    /// cursor a caller has already folded into its materialized state
    /// (typically the `seq` recorded in the last [`crate::snapshot::Snapshot`]).
    pub fn open(path: impl AsRef<Path>, processed_seq: u64) -> Result<Self, WalError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let write_seq = Self::scan_last_seq(&path)?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, writer: BufWriter::new(file), write_seq, processed_seq })
    }

    fn scan_last_seq(path: &Path) -> Result<u64, WalError> {
        if !path.exists() {
            return Ok(0);
        }
        let reader = BufReader::new(File::open(path)?);
        let mut last = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: WalEntry = serde_json::from_str(&line)?;
            last = entry.seq;
        }
        Ok(last)
    }

    /// Highest sequence number appended so far.
    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    /// Highest sequence number folded into the materialized state.
    pub fn processed_seq(&self) -> u64 {
        self.processed_seq
    }

    /// Append one record, returning its assigned sequence number. Not
    /// durable until [`Wal::flush`].
    pub fn append(&mut self, record: &Record) -> Result<u64, WalError> {
        let seq = self.write_seq + 1;
        let entry = WalEntry { seq, record: record.clone() };
        let line = serde_json::to_string(&entry)?;
        writeln!(self.writer, "{line}")?;
        self.write_seq = seq;
        Ok(seq)
    }

    pub fn flush(&mut self) -> Result<(), WalError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Advance the processed cursor. Called once a record's effect is
    /// visible in the materialized state.
    pub fn mark_processed(&mut self, seq: u64) {
        self.processed_seq = self.processed_seq.max(seq);
    }

    /// Entries after `processed_seq`, in ascending order. Used for replay
    /// on startup (after loading the most recent snapshot) and by tests
    /// asserting recovery behavior.
    pub fn next_unprocessed(&self) -> Result<Vec<WalEntry>, WalError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut out = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: WalEntry = serde_json::from_str(&line)?;
            if entry.seq > self.processed_seq {
                out.push(entry);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
