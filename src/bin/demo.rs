// Koan demonstration suite: one passing and one failing test, showing the
// capture and failure-report rendering end to end.
// Usage: cargo run --bin demo -- [-qsvx]

use std::process::ExitCode;

use koan::{check_eq, check_ne, tests, TestFlow, TestState};

fn success(t: &mut TestState) -> TestFlow {
    println!("success");
    check_eq!(t, 1, 1);
    Ok(())
}

fn failure(t: &mut TestState) -> TestFlow {
    println!("failure");
    check_ne!(t, 1, 1);
    Ok(())
}

fn main() -> ExitCode {
    koan::cli::run(&tests![success, failure])
}
