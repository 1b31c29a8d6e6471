// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier and the persisted job record.

use crate::array::ArraySpec;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Internal job identifier (`unique` in spec terms): allocator-issued,
/// immutable, never recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend-facing job identifier. Defaults to the internal id and may be
/// overwritten once a backend (or the allocator) assigns its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(pub u64);

impl std::fmt::Display for ExternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The command argv, preserved byte-for-byte (as owned `String` tokens).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command(pub Vec<String>);

impl Command {
    pub fn new(argv: Vec<String>) -> Self {
        Self(argv)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Render as a single shell-ish line for display purposes (not used for
    /// execution — execution always uses the preserved argv directly).
    pub fn display_line(&self) -> String {
        self.0.join(" ")
    }
}

/// One user-submitted command, possibly expanded into an array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub unique: JobId,
    pub external_id: ExternalId,
    pub command: Command,
    pub name: Option<String>,
    pub queue_name: String,
    /// Backend-specific argument map (e.g. SGE resource requests).
    pub grid_args: HashMap<String, String>,
    pub log_dir: Option<PathBuf>,
    pub array_spec: Option<ArraySpec>,
    pub stop_on_failure: bool,
    pub status: Status,
    pub result: Option<i32>,
}

impl Job {
    /// Construct a freshly-allocated job in `Status::Submitted`. Array
    /// element records (if any) are created separately by the Store, which
    /// is the only place `unique` is minted.
    pub fn new(unique: JobId, config: JobConfig) -> Self {
        Self {
            unique,
            external_id: ExternalId(unique.0),
            command: config.command,
            name: config.name,
            queue_name: config.queue_name,
            grid_args: config.grid_args,
            log_dir: config.log_dir,
            array_spec: config.array_spec,
            stop_on_failure: config.stop_on_failure,
            status: Status::Submitted,
            result: None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_spec.is_some()
    }

    pub fn get_command_line(&self) -> &[String] {
        self.command.as_slice()
    }

    /// `{log_dir}/{name or "job"}.o{external_id}` — empty when `log_dir` is unset.
    pub fn stdout_path(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| {
            dir.join(format!("{}.o{}", self.name.as_deref().unwrap_or("job"), self.external_id))
        })
    }

    /// `{log_dir}/{name or "job"}.e{external_id}` — empty when `log_dir` is unset.
    pub fn stderr_path(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| {
            dir.join(format!("{}.e{}", self.name.as_deref().unwrap_or("job"), self.external_id))
        })
    }
}

/// Configuration for creating a new job, built with [`JobConfigBuilder`].
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub command: Command,
    pub name: Option<String>,
    pub queue_name: String,
    pub grid_args: HashMap<String, String>,
    pub log_dir: Option<PathBuf>,
    pub array_spec: Option<ArraySpec>,
    pub stop_on_failure: bool,
}

impl JobConfig {
    pub fn builder(command: Vec<String>) -> JobConfigBuilder {
        JobConfigBuilder {
            command: Command::new(command),
            name: None,
            queue_name: "local".to_string(),
            grid_args: HashMap::new(),
            log_dir: None,
            array_spec: None,
            stop_on_failure: false,
        }
    }
}

pub struct JobConfigBuilder {
    command: Command,
    name: Option<String>,
    queue_name: String,
    grid_args: HashMap<String, String>,
    log_dir: Option<PathBuf>,
    array_spec: Option<ArraySpec>,
    stop_on_failure: bool,
}

impl JobConfigBuilder {
    crate::setters! {
        option { name: String }
        into { queue_name: String }
        set { grid_args: HashMap<String, String> }
        option { log_dir: PathBuf }
        option { array_spec: ArraySpec }
        set { stop_on_failure: bool }
    }

    pub fn build(self) -> JobConfig {
        JobConfig {
            command: self.command,
            name: self.name,
            queue_name: self.queue_name,
            grid_args: self.grid_args,
            log_dir: self.log_dir,
            array_spec: self.array_spec,
            stop_on_failure: self.stop_on_failure,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
