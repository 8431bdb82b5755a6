//! Per-test output isolation.
//!
//! A [`CaptureContext`] owns the two anonymous temp-file sinks backing one
//! test run (`testlog` for whatever the body prints, `faillog` for
//! assertion diagnostics) and, unless capture is disabled, a scoped
//! redirection of the process's stdout/stderr file descriptors onto the
//! `testlog`. The redirection is a drop guard: the original descriptors
//! are restored on every exit path, including the early return from a
//! failing assertion, so no test can leak a rebound stream into the next.
//!
//! Sink allocation failure is fatal to the whole run: without a capture
//! target no test can execute correctly, so the error propagates to the
//! driver, which reports and terminates.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};

use crate::errors::HarnessError;

/// The isolation unit for a single test run.
pub struct CaptureContext {
    testlog: File,
    faillog: File,
    redirect: Option<RedirectGuard>,
}

impl CaptureContext {
    /// Allocate both sinks and, when `redirect_streams` is set, rebind the
    /// process's stdout and stderr onto the `testlog`.
    pub fn open(redirect_streams: bool) -> Result<Self, HarnessError> {
        let testlog = tempfile::tempfile().map_err(HarnessError::SinkAllocation)?;
        let faillog = tempfile::tempfile().map_err(HarnessError::SinkAllocation)?;
        let redirect = if redirect_streams {
            Some(RedirectGuard::install(&testlog).map_err(HarnessError::Redirect)?)
        } else {
            None
        };
        Ok(Self {
            testlog,
            faillog,
            redirect,
        })
    }

    /// The sink assertion diagnostics are written to. Unaffected by the
    /// stream redirection, which only rebinds fds 1 and 2.
    pub fn faillog(&mut self) -> &mut File {
        &mut self.faillog
    }

    /// Restore the process streams now instead of at drop time. The runner
    /// calls this after the body returns, so everything it prints lands in
    /// the `testlog` and everything after goes to the terminal again.
    pub fn release_streams(&mut self) {
        drop(self.redirect.take());
    }

    /// Drain everything the test printed while its streams were captured.
    pub fn drain_testlog(&mut self) -> Result<String, HarnessError> {
        drain(&mut self.testlog)
    }

    /// Drain the recorded assertion diagnostics.
    pub fn drain_faillog(&mut self) -> Result<String, HarnessError> {
        drain(&mut self.faillog)
    }
}

fn drain(sink: &mut File) -> Result<String, HarnessError> {
    let mut contents = String::new();
    sink.seek(SeekFrom::Start(0))
        .map_err(HarnessError::SinkReadback)?;
    sink.read_to_string(&mut contents)
        .map_err(HarnessError::SinkReadback)?;
    Ok(contents)
}

/// Duplicate the process's current stderr into an owned handle. The driver
/// acquires this before any test runs, so the final digest stays visible
/// even while a test's own fd 2 is rebound to its capture sink.
pub fn real_stderr() -> Result<File, HarnessError> {
    let fd = dup(libc::STDERR_FILENO).map_err(HarnessError::Redirect)?;
    Ok(File::from(fd))
}

/// Scoped rebinding of fds 1 and 2 onto a capture sink. Installing saves
/// the original descriptors; dropping flushes Rust's buffered streams and
/// puts the originals back.
struct RedirectGuard {
    saved_stdout: OwnedFd,
    saved_stderr: OwnedFd,
}

impl RedirectGuard {
    fn install(target: &File) -> io::Result<Self> {
        // Flush anything buffered on the Rust side before the descriptors
        // change underneath it.
        io::stdout().flush()?;
        io::stderr().flush()?;
        let saved_stdout = dup(libc::STDOUT_FILENO)?;
        let saved_stderr = dup(libc::STDERR_FILENO)?;
        dup2(target.as_raw_fd(), libc::STDOUT_FILENO)?;
        dup2(target.as_raw_fd(), libc::STDERR_FILENO)?;
        Ok(Self {
            saved_stdout,
            saved_stderr,
        })
    }
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        // Push any straggling test output into the sink before the streams
        // point back at the terminal.
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        let _ = dup2(self.saved_stdout.as_raw_fd(), libc::STDOUT_FILENO);
        let _ = dup2(self.saved_stderr.as_raw_fd(), libc::STDERR_FILENO);
        // OwnedFd closes the saved duplicates.
    }
}

fn dup(fd: RawFd) -> io::Result<OwnedFd> {
    let duplicate = unsafe { libc::dup(fd) };
    if duplicate < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: dup returned a fresh descriptor owned by no one else.
    Ok(unsafe { OwnedFd::from_raw_fd(duplicate) })
}

fn dup2(src: RawFd, dst: RawFd) -> io::Result<()> {
    if unsafe { libc::dup2(src, dst) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
