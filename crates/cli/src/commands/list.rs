// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::ExitError;
use crate::output;
use anyhow::Result;
use clap::Args;
use jobctl_core::JobId;
use jobctl_engine::Manager;
use jobctl_storage::JobFilter;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List only the jobs with the given ids (default: all jobs)
    #[arg(short = 'j', long = "job-ids", value_name = "ID")]
    job_ids: Vec<u64>,
    /// Print the array elements of a single given job instead of job rows
    #[arg(short = 'a', long = "print-array-jobs")]
    print_array_jobs: bool,
    /// Print each job's dependencies alongside it
    #[arg(short = 'x', long = "print-dependencies")]
    print_dependencies: bool,
}

pub fn run(args: ListArgs, manager: &Manager) -> Result<()> {
    let filter = if args.job_ids.is_empty() {
        JobFilter::all()
    } else {
        JobFilter::ids(args.job_ids.iter().map(|&id| JobId(id)).collect())
    };
    let jobs = manager.list(&filter);

    if args.print_array_jobs {
        let job = jobs.first().ok_or_else(|| {
            ExitError::new(2, "--print-array-jobs requires a single --job-ids argument")
        })?;
        let guard = manager.store().lock();
        output::print_array_elements(&*guard, job);
        return Ok(());
    }

    let guard = manager.store().lock();
    output::print_job_list(&*guard, &jobs, args.print_dependencies);
    Ok(())
}
