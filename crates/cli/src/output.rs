// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jobctl_core::Job;
use jobctl_engine::build_row;
use jobctl_storage::Store;

const MAX_COMMAND_WIDTH: usize = 60;

/// Print one row per job, in `list`'s order, with dependency ids appended
/// when `print_dependencies` is set.
pub fn print_job_list(store: &dyn Store, jobs: &[Job], print_dependencies: bool) {
    println!("{}", crate::color::header("ID\tSTATUS\tCOMMAND"));
    for job in jobs {
        let dependencies = if print_dependencies { store.predecessors(job.unique) } else { Vec::new() };
        let row = build_row(job, dependencies, MAX_COMMAND_WIDTH);
        println!("{row}");
    }
}

/// Print one row per array element of `job`, used by `list --print-array-jobs`.
pub fn print_array_elements(store: &dyn Store, job: &Job) {
    println!("{}", crate::color::header(&format!("ID\tSTATUS  (job {})", job.unique)));
    for element in store.elements(job.unique) {
        let status = match element.result {
            Some(result) => format!("{}({result})", element.status),
            None => element.status.to_string(),
        };
        println!("{}.{}\t{status}", job.unique, element.index);
    }
}

/// Print one job's captured stdout/stderr, used by the `report` command.
pub fn print_report_entry(job: &Job, element_index: Option<i64>, output: bool, error: bool) {
    let label = match element_index {
        Some(idx) => format!("{}.{idx}", job.unique),
        None => job.unique.to_string(),
    };
    println!("{}", crate::color::header(&format!("=== job {label} ===")));

    if output {
        match job.stdout_path().map(|p| with_element_suffix(p, element_index)) {
            Some(path) => print_log_file(&path, "stdout"),
            None => println!("(no log directory configured)"),
        }
    }
    if error {
        match job.stderr_path().map(|p| with_element_suffix(p, element_index)) {
            Some(path) => print_log_file(&path, "stderr"),
            None => println!("(no log directory configured)"),
        }
    }
}

fn print_log_file(path: &std::path::Path, label: &str) {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            println!("--- {label} ({}) ---", path.display());
            print!("{contents}");
        }
        Err(err) => println!("--- {label} ({}): {err} ---", path.display()),
    }
}

fn with_element_suffix(path: std::path::PathBuf, element_index: Option<i64>) -> std::path::PathBuf {
    match element_index {
        Some(idx) => {
            let mut os = path.into_os_string();
            os.push(format!(".{idx}"));
            os.into()
        }
        None => path,
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
