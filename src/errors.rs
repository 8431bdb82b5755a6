//! Koan Error Handling
//!
//! Infrastructure failures only: a test that fails an assertion is not an
//! error, it is a recorded outcome. Everything in this module is fatal to
//! the whole run, because without a capture sink or a report stream the
//! harness cannot guarantee isolation or even an output destination.

use miette::Diagnostic;
use thiserror::Error;

/// A fatal harness failure. Any of these terminates the process with a
/// nonzero status before or instead of the final digest.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    /// A per-test temporary sink could not be allocated.
    #[error("failed to allocate a temporary capture sink")]
    #[diagnostic(
        code(koan::capture::sink),
        help("the harness stores per-test output in anonymous temp files; check that a writable temp directory exists")
    )]
    SinkAllocation(#[source] std::io::Error),

    /// The process's standard streams could not be redirected or restored.
    #[error("failed to redirect the standard streams")]
    #[diagnostic(
        code(koan::capture::redirect),
        help("run with -s to disable stream capture entirely")
    )]
    Redirect(#[source] std::io::Error),

    /// A capture sink could not be read back into the report.
    #[error("failed to read back a capture sink")]
    #[diagnostic(code(koan::capture::readback))]
    SinkReadback(#[source] std::io::Error),

    /// The report stream itself rejected a write.
    #[error("failed to write to the report stream")]
    #[diagnostic(code(koan::report::stream))]
    Report(#[source] std::io::Error),
}
