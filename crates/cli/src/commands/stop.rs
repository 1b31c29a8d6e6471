// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::commands::resubmit::resolve_job_ids;
use crate::exit_error::ExitError;
use anyhow::{Context, Result};
use clap::Args;
use jobctl_engine::Manager;

#[derive(Args, Debug)]
pub struct StopArgs {
    /// Stop only the jobs with the given ids (default: all jobs)
    #[arg(short = 'j', long = "job-ids", value_name = "ID")]
    job_ids: Vec<u64>,
}

pub async fn run(args: StopArgs, config: &crate::config::Config, manager: &Manager) -> Result<()> {
    if config.local {
        return Err(ExitError::new(2, "stopping jobs locally is not supported; kill them yourself").into());
    }
    let job_ids = resolve_job_ids(&args.job_ids, manager);
    manager.stop(&job_ids).await.context("stop failed")
}
