// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobctl_core::JobId;
use tempfile::tempdir;

fn test_record(job: u64) -> Record {
    Record::CreateArrayElement { job: JobId(job), index: 1 }
}

#[test]
fn open_creates_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("test.wal");

    let wal = Wal::open(&path, 0).expect("open");

    assert!(path.exists());
    assert_eq!(wal.write_seq(), 0);
    assert_eq!(wal.processed_seq(), 0);
}

#[test]
fn append_and_flush() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("test.wal");
    let mut wal = Wal::open(&path, 0).expect("open");

    let seq1 = wal.append(&test_record(1)).expect("append");
    let seq2 = wal.append(&test_record(2)).expect("append");
    assert_eq!(seq1, 1);
    assert_eq!(seq2, 2);

    wal.flush().expect("flush");
    let metadata = std::fs::metadata(&path).expect("metadata");
    assert!(metadata.len() > 0);
}

#[test]
fn next_unprocessed_returns_only_new_entries() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("test.wal");
    let mut wal = Wal::open(&path, 0).expect("open");

    wal.append(&test_record(1)).expect("append");
    wal.append(&test_record(2)).expect("append");
    wal.flush().expect("flush");

    let pending = wal.next_unprocessed().expect("replay");
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].seq, 1);
    assert_eq!(pending[1].seq, 2);

    wal.mark_processed(1);
    let pending = wal.next_unprocessed().expect("replay");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].seq, 2);
}

#[test]
fn reopen_resumes_sequence_and_processed_cursor() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("test.wal");

    {
        let mut wal = Wal::open(&path, 0).expect("open");
        wal.append(&test_record(1)).expect("append");
        wal.append(&test_record(2)).expect("append");
        wal.flush().expect("flush");
    }

    let wal = Wal::open(&path, 1).expect("reopen");
    assert_eq!(wal.write_seq(), 2);
    assert_eq!(wal.processed_seq(), 1);

    let pending = wal.next_unprocessed().expect("replay");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].seq, 2);
}
