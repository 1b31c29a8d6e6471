// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::{Context, Result};
use clap::Args;
use jobctl_core::JobId;
use jobctl_engine::Manager;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Delete only the jobs with the given ids (default: all jobs)
    #[arg(short = 'j', long = "job-ids", value_name = "ID")]
    job_ids: Vec<u64>,
    /// Keep the log files (by default they are removed along with the job)
    #[arg(short = 'r', long = "keep-logs")]
    keep_logs: bool,
    /// Keep the log directory when removing logs
    #[arg(short = 'R', long = "keep-log-dir")]
    keep_log_dir: bool,
}

pub async fn run(args: DeleteArgs, config: &crate::config::Config, manager: &Manager) -> Result<()> {
    let job_ids: Vec<JobId> = if args.job_ids.is_empty() {
        manager.list(&jobctl_storage::JobFilter::all()).into_iter().map(|j| j.unique).collect()
    } else {
        args.job_ids.iter().map(|&id| JobId(id)).collect()
    };

    if !config.local {
        // Best-effort: running grid jobs are stopped before their records
        // are removed, so the scheduler doesn't keep reporting on a job the
        // store no longer knows about.
        if let Err(err) = manager.stop(&job_ids).await {
            tracing::warn!(%err, "failed to stop jobs before deleting them");
        }
    }

    if !args.keep_logs {
        remove_logs(manager, &job_ids, args.keep_log_dir);
    }

    manager.delete(&job_ids).context("delete failed")
}

fn remove_logs(manager: &Manager, job_ids: &[JobId], keep_log_dir: bool) {
    for &job_id in job_ids {
        let Some(job) = manager.get_job(job_id) else { continue };
        for path in [job.stdout_path(), job.stderr_path()].into_iter().flatten() {
            if let Err(err) = std::fs::remove_file(&path) {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), %err, "failed to remove log file");
                }
            }
        }
        if !keep_log_dir {
            if let Some(dir) = &job.log_dir {
                let _ = std::fs::remove_dir(dir);
            }
        }
    }
}
