//! The resolved run configuration: four independent switches, snapshotted
//! once before any test runs and never mutated afterwards. The driver and
//! runner receive it by reference; there is no global state.

// Color constants for terminal output
pub(crate) const RESET: &str = "\x1b[0m";
pub(crate) const BOLD: &str = "\x1b[1m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const BLUE: &str = "\x1b[34m";

/// Immutable snapshot of the harness switches for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// `-q`: omit captured stdout/stderr blocks from the report.
    pub quiet: bool,
    /// `-s`: leave the standard streams alone while a test runs.
    pub no_capture: bool,
    /// `-v`: print each test's name next to its status glyph.
    pub verbose: bool,
    /// `-x`: stop running further tests after the first failure.
    pub fail_fast: bool,
    /// Whether report text is colorized with ANSI escapes.
    pub use_colors: bool,
}

impl Config {
    /// True when per-test stream redirection should be installed.
    pub fn capture_enabled(&self) -> bool {
        !self.no_capture
    }

    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: false,
            no_capture: false,
            verbose: false,
            fail_fast: false,
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Config {
        Config {
            quiet: false,
            no_capture: false,
            verbose: false,
            fail_fast: false,
            use_colors: false,
        }
    }

    #[test]
    fn colorize_is_identity_without_colors() {
        assert_eq!(plain().colorize("FAILED", RED), "FAILED");
    }

    #[test]
    fn colorize_wraps_with_reset() {
        let config = Config {
            use_colors: true,
            ..plain()
        };
        assert_eq!(config.colorize("OK", GREEN), "\x1b[32mOK\x1b[0m");
    }

    #[test]
    fn capture_follows_the_s_switch() {
        assert!(plain().capture_enabled());
        let config = Config {
            no_capture: true,
            ..plain()
        };
        assert!(!config.capture_enabled());
    }
}
