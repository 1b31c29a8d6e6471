// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `jobctl`: submit and track batch jobs, locally or on an SGE-like grid.

mod color;
mod commands;
mod config;
mod exit_error;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{delete, execute, list, report, resubmit, run_job, stop, submit};
use config::Config;
use exit_error::ExitError;
use jobctl_engine::{Dispatcher, GridBackend, LocalBackend, Manager, SubprocessGridClient};
use jobctl_storage::{FileStore, SharedStore};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

/// Number of local workers used for commands other than `execute` (which
/// takes its own `-p`/`--parallel`).
const DEFAULT_LOCAL_PARALLELISM: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "jobctl", version, about = "A persistent batch job manager", styles = color::styles())]
struct Cli {
    /// Use the local worker pool instead of the grid scheduler
    #[arg(short = 'l', long, global = true)]
    local: bool,
    /// Database directory (defaults to $JOBCTL_DB or ./.jobctl)
    #[arg(short = 'd', long = "db", value_name = "DATABASE", global = true)]
    db: Option<PathBuf>,
    /// Default submission queue (defaults to $JOBCTL_QUEUE or "all.q")
    #[arg(short = 'q', long = "queue", value_name = "QNAME", global = true)]
    queue: Option<String>,
    /// Enable debug-level logging
    #[arg(short = 'g', long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a self-contained job
    #[command(alias = "sub")]
    Submit(submit::SubmitArgs),
    /// Re-submit a list of jobs
    #[command(alias = "re")]
    Resubmit(resubmit::ResubmitArgs),
    /// Stop the execution of jobs in the grid
    Stop(stop::StopArgs),
    /// List jobs stored in the database
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// Print the result and log output of finished jobs
    #[command(alias = "ref")]
    #[command(alias = "r")]
    Report(report::ReportArgs),
    /// Remove jobs from the database
    #[command(alias = "del")]
    #[command(alias = "rm")]
    #[command(alias = "remove")]
    Delete(delete::DeleteArgs),
    /// Run the registered jobs on the local machine (only with --local)
    #[command(alias = "exe")]
    #[command(alias = "x")]
    Execute(execute::ExecuteArgs),
    /// Internal wrapper entry point invoked by the grid scheduler
    #[command(hide = true, name = "run-job")]
    RunJob(run_job::RunJobArgs),
}

fn open_store(config: &Config) -> anyhow::Result<SharedStore> {
    let store = FileStore::open(&config.db)
        .with_context(|| format!("failed to open store at {}", config.db.display()))?;
    Ok(Arc::new(Mutex::new(store)))
}

fn build_manager(config: &Config, store: SharedStore) -> Manager {
    let dispatcher: Box<dyn Dispatcher> = if config.local {
        Box::new(LocalBackend::new(store.clone(), DEFAULT_LOCAL_PARALLELISM))
    } else {
        let client = SubprocessGridClient {
            submit_binary: PathBuf::from("qsub"),
            stop_binary: PathBuf::from("qdel"),
        };
        Box::new(GridBackend::new(store.clone(), client, config.wrapper.clone()))
    };
    Manager::new(store, dispatcher)
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let config = Config::resolve(cli.db, cli.queue, cli.local);
    let store = open_store(&config)?;
    let manager = build_manager(&config, store.clone());

    match cli.command {
        Command::Submit(args) => submit::run(args, &config, &manager).await?,
        Command::Resubmit(args) => resubmit::run(args, &manager).await?,
        Command::Stop(args) => stop::run(args, &config, &manager).await?,
        Command::List(args) => list::run(args, &manager)?,
        Command::Report(args) => report::run(args, &manager)?,
        Command::Delete(args) => delete::run(args, &config, &manager).await?,
        Command::Execute(args) => execute::run(args, &config, store.clone()).await?,
        Command::RunJob(args) => run_job::run(args, store.clone(), config.wrapper.clone()).await?,
    }

    manager.checkpoint().context("failed to checkpoint store")?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        if let Some(exit_err) = err.downcast_ref::<ExitError>() {
            eprintln!("{}", exit_err.message);
            std::process::exit(exit_err.code);
        }
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
