//! Defines the command-line flags accepted by every Koan suite binary.
//!
//! This module uses the `clap` crate with its "derive" feature. All four
//! switches are independent booleans and combine in a single token
//! (`-qv` is `-q -v`); `-h` prints usage and exits 0; an unknown flag or
//! a stray positional argument prints usage and exits nonzero.

use clap::Parser;

use crate::config::Config;

/// The harness flag set.
#[derive(Debug, Parser)]
#[command(version, about = "Run the declared test suite and report the outcome.")]
pub struct HarnessArgs {
    /// Omit captured stdout/stderr blocks from the report.
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Do not capture the standard streams while a test runs.
    #[arg(short = 's')]
    pub no_capture: bool,

    /// Print each test's name next to its status glyph.
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Stop running further tests after the first failure.
    #[arg(short = 'x')]
    pub fail_fast: bool,
}

impl HarnessArgs {
    /// Resolve the parsed flags into the immutable run configuration,
    /// snapshotting the color choice from the report stream's TTY-ness.
    pub fn into_config(self) -> Config {
        Config {
            quiet: self.quiet,
            no_capture: self.no_capture,
            verbose: self.verbose,
            fail_fast: self.fail_fast,
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_off() {
        let args = HarnessArgs::parse_from(["suite"]);
        let config = args.into_config();
        assert!(!config.quiet && !config.no_capture && !config.verbose && !config.fail_fast);
    }

    #[test]
    fn combined_token_sets_each_switch() {
        let args = HarnessArgs::parse_from(["suite", "-qx"]);
        let config = args.into_config();
        assert!(config.quiet);
        assert!(config.fail_fast);
        assert!(!config.verbose);
    }

    #[test]
    fn separate_tokens_work_too() {
        let args = HarnessArgs::parse_from(["suite", "-s", "-v"]);
        let config = args.into_config();
        assert!(config.no_capture);
        assert!(config.verbose);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(HarnessArgs::try_parse_from(["suite", "-z"]).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(HarnessArgs::try_parse_from(["suite", "stray"]).is_err());
    }
}
