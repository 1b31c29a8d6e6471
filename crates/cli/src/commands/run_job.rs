// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The hidden subcommand invoked by the grid scheduler's wrapper process for
//! each job (or array element): reads the `JOB_ID`/`SGE_TASK_ID` environment
//! contract set by the scheduler and calls back into the engine directly.

use crate::exit_error::ExitError;
use anyhow::{Context, Result};
use clap::Args;
use jobctl_core::JobId;
use jobctl_engine::{run_one, GridClient, SubprocessGridClient};
use jobctl_storage::{SharedStore, Store};

#[derive(Args, Debug)]
pub struct RunJobArgs {}

pub async fn run(_args: RunJobArgs, store: SharedStore, wrapper: std::path::PathBuf) -> Result<()> {
    let job_id = std::env::var("JOB_ID")
        .map_err(|_| ExitError::new(2, "JOB_ID is not set in the environment"))?
        .parse::<u64>()
        .map_err(|_| ExitError::new(2, "JOB_ID is not a valid integer"))?;

    let element_index = match std::env::var("SGE_TASK_ID") {
        Ok(value) if value != "undefined" => {
            Some(value.parse::<i64>().map_err(|_| ExitError::new(2, "SGE_TASK_ID is not a valid integer"))?)
        }
        _ => None,
    };

    let newly_queued = run_one(store.clone(), JobId(job_id), element_index).await.context("run-job failed")?;

    if !newly_queued.is_empty() {
        let client =
            SubprocessGridClient { submit_binary: std::path::PathBuf::from("qsub"), stop_binary: std::path::PathBuf::from("qdel") };
        for successor in newly_queued {
            let record = {
                let guard = store.lock();
                guard.get_job(successor).with_context(|| format!("unknown job {successor}"))?
            };
            let external_id = client
                .submit(&record, &wrapper)
                .await
                .with_context(|| format!("failed to submit {successor} to the grid"))?;
            let mut guard = store.lock();
            guard.update_external_id(successor, external_id).context("failed to record external id")?;
        }
    }

    Ok(())
}
