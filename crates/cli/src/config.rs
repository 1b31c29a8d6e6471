// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves the database path, default queue, and wrapper script path from
//! CLI flags with environment variable fallback (`JOBCTL_DB`, `JOBCTL_QUEUE`).

use std::path::PathBuf;

pub struct Config {
    pub db: PathBuf,
    pub queue: String,
    pub wrapper: PathBuf,
    pub local: bool,
}

impl Config {
    pub fn resolve(db_flag: Option<PathBuf>, queue_flag: Option<String>, local: bool) -> Self {
        let db = db_flag
            .or_else(|| std::env::var_os("JOBCTL_DB").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(".jobctl"));
        let queue = queue_flag
            .or_else(|| std::env::var("JOBCTL_QUEUE").ok())
            .unwrap_or_else(|| "all.q".to_string());
        let wrapper = std::env::var_os("JOBCTL_WRAPPER")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::current_exe().unwrap_or_else(|_| PathBuf::from("jobctl")));
        Self { db, queue, wrapper, local }
    }
}
