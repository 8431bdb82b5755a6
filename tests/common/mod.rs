//! Shared helpers for the integration suites: run a declared test array
//! in-process against an in-memory report buffer.

use koan::{Config, Summary, Test};

/// A config with capture and colors off, for deterministic in-process runs.
pub fn plain_config() -> Config {
    Config {
        quiet: false,
        no_capture: true,
        verbose: false,
        fail_fast: false,
        use_colors: false,
    }
}

/// Run a suite and collect the report text alongside the summary.
pub fn run_collecting(suite: &[Test], config: &Config) -> (Summary, String) {
    let mut report = Vec::new();
    let summary = koan::run_suite(suite, config, &mut report).expect("suite run failed");
    (summary, String::from_utf8(report).expect("report was not UTF-8"))
}
