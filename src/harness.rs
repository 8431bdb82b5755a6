//! Koan Test Harness Core
//!
//! Runs a statically declared sequence of tests, one at a time and in
//! declaration order, and folds each test's outcome into a single
//! human-readable report.
//!
//! # Architecture
//!
//! The harness follows a two-scope execution model:
//! 1. **Runner** ([`run_test`]): executes exactly one test inside a fresh
//!    [`CaptureContext`], times it, and appends its report fragment: a
//!    status glyph on the live progress stream, plus `FAILURE` and
//!    `CAPTURED STDOUT/STDERR` blocks on the main log.
//! 2. **Driver** ([`run_suite`]): sequences the declared tests, keeps the
//!    top-level tallies, enforces stop-on-failure, and prints the final
//!    digest.
//!
//! A failing assertion is fully absorbed at the runner boundary; the only
//! errors that cross it are infrastructure failures (sink allocation,
//! stream redirection, report writes), which abort the whole run.
//!
//! # Example
//!
//! ```rust,no_run
//! use koan::{check_eq, tests, Config, TestFlow, TestState};
//!
//! fn arithmetic(t: &mut TestState) -> TestFlow {
//!     check_eq!(t, 2 + 2, 4);
//!     Ok(())
//! }
//!
//! let mut report = koan::capture::real_stderr().unwrap();
//! let summary = koan::run_suite(&tests![arithmetic], &Config::default(), &mut report).unwrap();
//! assert!(summary.all_passed());
//! ```

use std::io::Write;
use std::time::{Duration, Instant};

use crate::capture::CaptureContext;
use crate::config::{Config, BLUE, BOLD, GREEN, RED};
use crate::errors::HarnessError;
use crate::suite::{Test, TestState};

// =============================================================================
// CORE TYPES
// =============================================================================

/// Outcome of one executed test: classification plus wall-clock duration.
#[derive(Debug, Clone, Copy)]
pub struct Verdict {
    pub passed: bool,
    pub elapsed: Duration,
}

/// Top-level tallies for a completed (or stop-on-failure truncated) run.
#[derive(Debug, Clone)]
pub struct Summary {
    pub successes: u32,
    pub failures: u32,
    pub elapsed: Duration,
}

impl Summary {
    /// Number of tests that actually ran. Tests skipped by stop-on-failure
    /// are never counted.
    pub fn executed(&self) -> u32 {
        self.successes + self.failures
    }

    pub fn all_passed(&self) -> bool {
        self.failures == 0
    }
}

// =============================================================================
// TEST RUNNER
// =============================================================================

/// Run exactly one test to completion or to its first failing assertion.
///
/// The test's report fragment goes two ways: the status glyph (and name,
/// in verbose mode) is written immediately to `progress`, the real,
/// unredirected error stream, while failure diagnostics and captured
/// output are appended to `mainlog` for the driver to replay in the final
/// digest.
pub fn run_test<W: Write>(
    test: &Test,
    config: &Config,
    mainlog: &mut String,
    progress: &mut W,
) -> Result<Verdict, HarnessError> {
    let mut capture = CaptureContext::open(config.capture_enabled())?;

    let start = Instant::now();
    let failures = {
        let mut state = TestState::new(capture.faillog());
        // A Halt here is the body's own business; the runner only reads
        // the failure counter it left behind.
        let _ = (test.body)(&mut state);
        state.failures()
    };
    let elapsed = start.elapsed();
    capture.release_streams();

    let passed = failures == 0;
    if passed {
        write!(progress, "{}", config.colorize(".", GREEN)).map_err(HarnessError::Report)?;
        if config.verbose {
            let name_line = format!("  {}\n", test.name);
            write!(progress, "{}", config.colorize(&name_line, GREEN))
                .map_err(HarnessError::Report)?;
        }
    } else {
        write!(progress, "{}", config.colorize("F", RED)).map_err(HarnessError::Report)?;
        if config.verbose {
            let name_line = format!("  {}\n", test.name);
            write!(progress, "{}", config.colorize(&name_line, RED))
                .map_err(HarnessError::Report)?;
        }
    }

    let diagnostics = capture.drain_faillog()?;
    if !diagnostics.is_empty() {
        mainlog.push_str(&format!(
            "\n{} in {}",
            config.colorize("FAILURE", RED),
            config.colorize(&format!("{}\n", test.name), BOLD)
        ));
        mainlog.push_str(&diagnostics);
    }

    if !config.quiet {
        let printed = capture.drain_testlog()?;
        if !printed.is_empty() {
            mainlog.push_str(&format!(
                "\n{} for {}",
                config.colorize("CAPTURED STDOUT/STDERR", BLUE),
                config.colorize(&format!("{}\n", test.name), BOLD)
            ));
            mainlog.push_str(&printed);
        }
    }

    Ok(Verdict { passed, elapsed })
}

// =============================================================================
// SUITE DRIVER
// =============================================================================

/// Run every declared test in declaration order and print the digest.
///
/// `report` is the destination for all operator-facing output: normally
/// the handle from [`crate::capture::real_stderr`], injectable for tests.
/// Returns the top-level [`Summary`]; the caller maps `all_passed` onto
/// the process exit code.
pub fn run_suite<W: Write>(
    tests: &[Test],
    config: &Config,
    report: &mut W,
) -> Result<Summary, HarnessError> {
    let start = Instant::now();
    let mut mainlog = String::new();
    let mut summary = Summary {
        successes: 0,
        failures: 0,
        elapsed: Duration::ZERO,
    };

    for test in tests {
        let verdict = run_test(test, config, &mut mainlog, report)?;
        if verdict.passed {
            summary.successes += 1;
        } else {
            summary.failures += 1;
            // Stop-on-failure is a between-tests policy: counted failures
            // stand, the rest of the sequence is simply never run.
            if config.fail_fast {
                break;
            }
        }
    }
    summary.elapsed = start.elapsed();

    print_digest(&summary, &mainlog, config, report)?;
    Ok(summary)
}

// =============================================================================
// REPORTING
// =============================================================================

fn print_digest<W: Write>(
    summary: &Summary,
    mainlog: &str,
    config: &Config,
    report: &mut W,
) -> Result<(), HarnessError> {
    // Terminate the bare glyph line; verbose mode already ends each test
    // on its own line.
    if !config.verbose {
        writeln!(report).map_err(HarnessError::Report)?;
    }
    report
        .write_all(mainlog.as_bytes())
        .map_err(HarnessError::Report)?;

    writeln!(
        report,
        "\nRAN {} TESTS IN {}s",
        config.colorize(&summary.executed().to_string(), BOLD),
        config.colorize(&format!("{:.3}", summary.elapsed.as_secs_f64()), BOLD)
    )
    .map_err(HarnessError::Report)?;

    if summary.executed() > 0 {
        let verdict = if summary.all_passed() {
            config.colorize("OK", GREEN)
        } else {
            config.colorize("FAILED", RED)
        };
        writeln!(
            report,
            "\n{} (SUCCESS: {}, FAILURE: {})",
            verdict,
            config.colorize(&summary.successes.to_string(), GREEN),
            config.colorize(&summary.failures.to_string(), RED)
        )
        .map_err(HarnessError::Report)?;
    } else {
        writeln!(report, "\n{}", config.colorize("NO TESTS FOUND", RED))
            .map_err(HarnessError::Report)?;
    }
    Ok(())
}
