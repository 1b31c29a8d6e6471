// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::{Context, Result};
use clap::Args;
use jobctl_core::JobId;
use jobctl_engine::Manager;

#[derive(Args, Debug)]
pub struct ResubmitArgs {
    /// Resubmit only the jobs with the given ids (default: all jobs)
    #[arg(short = 'j', long = "job-ids", value_name = "ID")]
    job_ids: Vec<u64>,
    /// Resubmit only jobs that have failed
    #[arg(short = 'f', long = "failed-only")]
    failed_only: bool,
    /// Also resubmit jobs that are running or waiting
    #[arg(short = 'a', long = "running-jobs")]
    running_jobs: bool,
}

pub async fn run(args: ResubmitArgs, manager: &Manager) -> Result<()> {
    let job_ids = resolve_job_ids(&args.job_ids, manager);
    manager.resubmit(&job_ids, args.failed_only, args.running_jobs).await.context("resubmit failed")
}

pub(crate) fn resolve_job_ids(flag: &[u64], manager: &Manager) -> Vec<JobId> {
    if flag.is_empty() {
        manager.list(&jobctl_storage::JobFilter::all()).into_iter().map(|j| j.unique).collect()
    } else {
        flag.iter().map(|&id| JobId(id)).collect()
    }
}
