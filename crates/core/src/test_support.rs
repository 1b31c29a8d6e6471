// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test builders for other crates' tests (gated behind `test-support`).

use crate::array::ArraySpec;
use crate::job::{ExternalId, Job, JobId};
use crate::status::Status;
use std::collections::HashMap;
use std::path::PathBuf;

/// Builder for [`Job`] fixtures. Defaults to a singleton job with id 1,
/// command `["echo", "hi"]`, in `Status::Submitted`.
pub struct JobBuilder {
    unique: JobId,
    command: Vec<String>,
    name: Option<String>,
    queue_name: String,
    stop_on_failure: bool,
    array_spec: Option<ArraySpec>,
    log_dir: Option<PathBuf>,
    status: Status,
    result: Option<i32>,
}

impl Default for JobBuilder {
    fn default() -> Self {
        Self {
            unique: JobId(1),
            command: vec!["echo".to_string(), "hi".to_string()],
            name: None,
            queue_name: "local".to_string(),
            stop_on_failure: false,
            array_spec: None,
            log_dir: None,
            status: Status::Submitted,
            result: None,
        }
    }
}

impl JobBuilder {
    pub fn unique(mut self, id: u64) -> Self {
        self.unique = JobId(id);
        self
    }

    pub fn command(mut self, argv: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.command = argv.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn stop_on_failure(mut self, v: bool) -> Self {
        self.stop_on_failure = v;
        self
    }

    pub fn array_spec(mut self, spec: ArraySpec) -> Self {
        self.array_spec = Some(spec);
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn result(mut self, result: i32) -> Self {
        self.result = Some(result);
        self
    }

    pub fn build(self) -> Job {
        Job {
            unique: self.unique,
            external_id: ExternalId(self.unique.0),
            command: crate::job::Command::new(self.command),
            name: self.name,
            queue_name: self.queue_name,
            grid_args: HashMap::new(),
            log_dir: self.log_dir,
            array_spec: self.array_spec,
            stop_on_failure: self.stop_on_failure,
            status: self.status,
            result: self.result,
        }
    }
}

impl Job {
    pub fn builder() -> JobBuilder {
        JobBuilder::default()
    }
}
