// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::output;
use anyhow::Result;
use clap::Args;
use jobctl_core::JobId;
use jobctl_engine::Manager;
use jobctl_storage::JobFilter;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Only report error logs
    #[arg(short = 'e', long = "errors-only")]
    errors_only: bool,
    /// Only report output logs
    #[arg(short = 'o', long = "output-only")]
    output_only: bool,
    /// Also report unfinished jobs
    #[arg(short = 'u', long = "unfinished-also")]
    unfinished_also: bool,
    /// Report only the jobs with the given ids (default: all finished jobs)
    #[arg(short = 'j', long = "job-ids", value_name = "ID")]
    job_ids: Vec<u64>,
    /// Report only the given array element indices of a single job
    #[arg(short = 'a', long = "array-ids", value_name = "ID")]
    array_ids: Vec<i64>,
}

pub fn run(args: ReportArgs, manager: &Manager) -> Result<()> {
    let filter = if args.job_ids.is_empty() {
        JobFilter::all()
    } else {
        JobFilter::ids(args.job_ids.iter().map(|&id| JobId(id)).collect())
    };

    let show_output = !args.errors_only;
    let show_error = !args.output_only;

    for job in manager.list(&filter) {
        if !job.status.is_terminal() && !args.unfinished_also {
            continue;
        }

        if job.is_array() && !args.array_ids.is_empty() {
            for &index in &args.array_ids {
                output::print_report_entry(&job, Some(index), show_output, show_error);
            }
        } else {
            output::print_report_entry(&job, None, show_output, show_error);
        }
    }
    Ok(())
}
