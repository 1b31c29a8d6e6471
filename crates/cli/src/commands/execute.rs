// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::ExitError;
use anyhow::Result;
use clap::Args;
use jobctl_core::JobId;
use jobctl_engine::LocalBackend;
use jobctl_storage::SharedStore;

#[derive(Args, Debug)]
pub struct ExecuteArgs {
    /// Number of jobs to run in parallel
    #[arg(short = 'p', long = "parallel", default_value_t = 1)]
    parallel: usize,
    /// Execute only the jobs with the given ids (default: all queued jobs)
    #[arg(short = 'j', long = "job-ids", value_name = "ID")]
    job_ids: Vec<u64>,
}

/// Reconcile jobs left `queued` (from a restart, or from a grid-like submit
/// that never runs eagerly) by running them with a dedicated worker pool
/// sized by `-p`/`--parallel`, independent of whatever parallelism the
/// process's own dispatcher was built with.
pub async fn run(args: ExecuteArgs, config: &crate::config::Config, store: SharedStore) -> Result<()> {
    if !config.local {
        return Err(ExitError::new(2, "the execute command can only be used with --local").into());
    }
    let backend = LocalBackend::new(store, args.parallel);
    let job_ids: Vec<JobId> = args.job_ids.iter().map(|&id| JobId(id)).collect();
    let filter = if job_ids.is_empty() { None } else { Some(job_ids.as_slice()) };
    let spawned = backend.run_queued_and_wait(filter).await;
    println!("{spawned} job(s) executed");
    Ok(())
}
