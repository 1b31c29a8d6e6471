// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::{Context, Result};
use clap::Args;
use jobctl_core::{ArraySpec, JobConfig, JobId};
use jobctl_engine::Manager;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Sets both h_vmem and mem_free (e.g. 8G)
    #[arg(short = 'm', long)]
    memory: Option<String>,
    /// Sets the job name
    #[arg(short, long)]
    name: Option<String>,
    /// Job identifiers this job waits for
    #[arg(short = 'x', long = "dependencies", value_name = "ID")]
    dependencies: Vec<u64>,
    /// Log directory; defaults to console output when running locally
    #[arg(short = 'l', long = "log-dir", value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// Environment variables passed to the job, as KEY=VALUE
    #[arg(short = 's', long = "environment", alias = "env", value_name = "KEY=VALUE")]
    environment: Vec<String>,
    /// Creates a parametric (array) job: "stop", "start-stop", or "start-stop:step"
    #[arg(short = 't', long = "array", alias = "parametric", value_name = "[start-]stop[:step]")]
    array: Option<String>,
    /// Wrap execution with the current python interpreter
    #[arg(short = 'p', long = "py", alias = "python")]
    python: bool,
    /// Print what would be submitted without submitting it
    #[arg(short = 'z', long = "dry-run")]
    dry_run: bool,
    /// Marks the job so it only lands on hosts that permit high-throughput I/O
    #[arg(short = 'I', long = "io-big")]
    io_big: bool,
    /// The command to run
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    job: Vec<String>,
}

pub async fn run(args: SubmitArgs, config: &crate::config::Config, manager: &Manager) -> Result<()> {
    let mut argv = args.job;
    if args.python {
        argv.insert(0, "python3".to_string());
    }

    let array_spec = match args.array {
        Some(spec) => Some(ArraySpec::parse(&spec).context("invalid array spec")?),
        None => None,
    };

    let mut grid_args: HashMap<String, String> = HashMap::new();
    if let Some(memory) = &args.memory {
        grid_args.insert("h_vmem".to_string(), memory.clone());
        grid_args.insert("mem_free".to_string(), memory.clone());
    }
    if args.io_big {
        grid_args.insert("io_big".to_string(), "true".to_string());
    }
    for pair in &args.environment {
        if let Some((key, value)) = pair.split_once('=') {
            grid_args.insert(format!("env:{key}"), value.to_string());
        }
    }

    if args.dry_run {
        println!(
            "-> job {:?} to queue {} with memory={:?} array={:?} deps={:?} env={:?} io_big={}",
            argv, config.queue, args.memory, array_spec, args.dependencies, args.environment, args.io_big
        );
        return Ok(());
    }

    let mut builder = JobConfig::builder(argv).queue_name(config.queue.clone()).grid_args(grid_args);
    if let Some(name) = args.name {
        builder = builder.name(name);
    }
    if let Some(log_dir) = args.log_dir {
        builder = builder.log_dir(log_dir);
    }
    if let Some(spec) = array_spec {
        builder = builder.array_spec(spec);
    }
    let job_config = builder.build();

    let dependency_ids: Vec<JobId> = args.dependencies.into_iter().map(JobId).collect();
    let job = manager.add_job(job_config, &dependency_ids).context("failed to create job")?;

    manager.submit(job).await.with_context(|| format!("failed to submit job {job}"))?;

    println!("{job}");
    Ok(())
}
