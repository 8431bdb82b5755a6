// Koan demonstration suite with no tests declared: renders the distinct
// empty-suite digest while still exiting successfully.

use std::process::ExitCode;

use koan::tests;

fn main() -> ExitCode {
    koan::cli::run(&tests![])
}
