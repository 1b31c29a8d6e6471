// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only projections of jobs into rendered rows (spec.md §4.5). The
//! CLI's `list`/`report` commands build on top of these.

use jobctl_core::{Job, JobId};

/// `{unique}[start-stop:step]` for array jobs, or just `{unique}` for
/// singletons.
pub fn id_label(job: &Job) -> String {
    match job.array_spec {
        Some(spec) => format!("{}{}", job.unique, spec),
        None => job.unique.to_string(),
    }
}

/// Status, with a `(result)` suffix once the job has a terminal result.
pub fn status_label(job: &Job) -> String {
    match job.result {
        Some(result) => format!("{}({result})", job.status),
        None => job.status.to_string(),
    }
}

/// Truncate `command` to `max_width` characters, appending `"..."` when it
/// doesn't fit. `max_width` is honored exactly: the ellipsis counts toward
/// it, never pushes past it.
pub fn truncate_command(command: &str, max_width: usize) -> String {
    if command.chars().count() <= max_width {
        return command.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let keep: String = command.chars().take(max_width - 3).collect();
    format!("{keep}...")
}

/// One rendered row: id (with array notation), status, the (possibly
/// truncated) command line, and dependency ids if requested.
pub struct JobRow {
    pub id_label: String,
    pub status_label: String,
    pub command: String,
    pub dependencies: Vec<JobId>,
}

pub fn build_row(job: &Job, dependencies: Vec<JobId>, max_command_width: usize) -> JobRow {
    JobRow {
        id_label: id_label(job),
        status_label: status_label(job),
        command: truncate_command(&job.command.display_line(), max_command_width),
        dependencies,
    }
}

impl std::fmt::Display for JobRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.id_label, self.status_label, self.command)?;
        if !self.dependencies.is_empty() {
            let ids: Vec<String> = self.dependencies.iter().map(JobId::to_string).collect();
            write!(f, "\tdeps=[{}]", ids.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
