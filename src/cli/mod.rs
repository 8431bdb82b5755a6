//! The Koan command-line entry point.
//!
//! A suite binary declares its tests and hands them to [`run`], which owns
//! the whole process lifecycle: flag parsing, report-stream acquisition,
//! suite execution, and the exit code.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use crate::capture;
use crate::cli::args::HarnessArgs;
use crate::errors::HarnessError;
use crate::harness;
use crate::suite::Test;

pub mod args;

/// Run the declared suite under the command-line flags and return the
/// process exit code: success iff every executed test passed (an empty
/// suite counts as success), failure on any failed test or fatal
/// infrastructure error.
pub fn run(tests: &[Test]) -> ExitCode {
    // clap exits on its own for -h (status 0) and for malformed
    // invocations (nonzero), before any test runs.
    let config = HarnessArgs::parse().into_config();

    // Grab the real stderr before any test can rebind fd 2, so the digest
    // is visible regardless of capture settings.
    let mut report = match capture::real_stderr() {
        Ok(handle) => handle,
        Err(error) => return fatal(error),
    };

    match harness::run_suite(tests, &config, &mut report) {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            let _ = writeln!(report, "{:?}", miette::Report::new(error));
            ExitCode::FAILURE
        }
    }
}

fn fatal(error: HarnessError) -> ExitCode {
    eprintln!("{:?}", miette::Report::new(error));
    ExitCode::FAILURE
}
