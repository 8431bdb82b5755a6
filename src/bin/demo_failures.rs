// Koan demonstration suite where every test fails. Exercises the
// stop-on-failure policy (-x) and the rendering of consecutive failure
// blocks; also the fixture for the CLI regression tests.
// Usage: cargo run --bin demo_failures -- [-qsvx]

use std::process::ExitCode;

use koan::{check_eq, check_lt, tests, TestFlow, TestState};

fn first_failure(t: &mut TestState) -> TestFlow {
    println!("first body ran");
    check_eq!(t, 1, 2);
    Ok(())
}

fn second_failure(t: &mut TestState) -> TestFlow {
    println!("second body ran");
    check_lt!(t, 9, 3);
    Ok(())
}

fn main() -> ExitCode {
    koan::cli::run(&tests![first_failure, second_failure])
}
