//! Driver and runner properties, exercised in-process through the library
//! API. Capture stays disabled here so the harness under test and the
//! harness running these tests never fight over the process streams; the
//! fd-level behavior is covered by the CLI regression suite.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use koan::{check_eq, check_ne, tests, Config, TestFlow, TestState};

use common::{plain_config, run_collecting};

fn passing(t: &mut TestState) -> TestFlow {
    check_eq!(t, 2 + 2, 4);
    Ok(())
}

fn failing(t: &mut TestState) -> TestFlow {
    check_ne!(t, 1, 1);
    Ok(())
}

#[test]
fn tallies_match_the_executed_tests() {
    let suite = tests![passing, failing, passing];
    let (summary, _) = run_collecting(&suite, &plain_config());
    assert_eq!(summary.successes, 2);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.executed(), 3);
    assert!(!summary.all_passed());
}

#[test]
fn mixed_suite_renders_glyphs_blocks_and_digest() {
    let suite = tests![passing, failing, passing];
    let (_, report) = run_collecting(&suite, &plain_config());
    assert!(report.starts_with(".F.\n"));
    assert!(report.contains("\nFAILURE in failing\n"));
    assert!(report.contains("Assertion failed: 1 == 1"));
    assert!(report.contains("\nRAN 3 TESTS IN "));
    assert!(report.contains("\nFAILED (SUCCESS: 2, FAILURE: 1)\n"));
}

#[test]
fn all_passing_suite_reports_ok() {
    let suite = tests![passing];
    let (summary, report) = run_collecting(&suite, &plain_config());
    assert!(summary.all_passed());
    assert!(report.starts_with(".\n"));
    assert!(report.contains("\nOK (SUCCESS: 1, FAILURE: 0)\n"));
    assert!(!report.contains("FAILURE in"));
    assert!(!report.contains("CAPTURED STDOUT/STDERR"));
}

#[test]
fn empty_suite_is_flagged_but_not_a_failure() {
    let (summary, report) = run_collecting(&tests![], &plain_config());
    assert_eq!(summary.executed(), 0);
    assert!(summary.all_passed());
    assert!(report.contains("\nRAN 0 TESTS IN "));
    assert!(report.contains("\nNO TESTS FOUND\n"));
    assert!(!report.contains("OK ("));
}

static ORDER: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

fn order_first(t: &mut TestState) -> TestFlow {
    ORDER.lock().unwrap().push("first");
    check_eq!(t, 1, 1);
    Ok(())
}

fn order_second(t: &mut TestState) -> TestFlow {
    ORDER.lock().unwrap().push("second");
    check_eq!(t, 1, 1);
    Ok(())
}

fn order_third(t: &mut TestState) -> TestFlow {
    ORDER.lock().unwrap().push("third");
    check_eq!(t, 1, 1);
    Ok(())
}

#[test]
fn tests_execute_in_declaration_order() {
    let suite = tests![order_first, order_second, order_third];
    let _ = run_collecting(&suite, &plain_config());
    assert_eq!(*ORDER.lock().unwrap(), ["first", "second", "third"]);
}

static SECOND_BODY_RAN: AtomicBool = AtomicBool::new(false);

fn fails_fast(t: &mut TestState) -> TestFlow {
    check_eq!(t, 1, 2);
    Ok(())
}

fn never_reached(t: &mut TestState) -> TestFlow {
    SECOND_BODY_RAN.store(true, Ordering::SeqCst);
    check_eq!(t, 1, 2);
    Ok(())
}

#[test]
fn stop_on_failure_skips_the_rest_of_the_sequence() {
    let config = Config {
        fail_fast: true,
        ..plain_config()
    };
    let suite = tests![fails_fast, never_reached];
    let (summary, report) = run_collecting(&suite, &config);
    assert_eq!(summary.executed(), 1);
    assert_eq!(summary.failures, 1);
    assert!(!SECOND_BODY_RAN.load(Ordering::SeqCst));
    assert!(report.contains("RAN 1 TESTS"));
    assert!(!report.contains("FAILURE in never_reached"));
}

static AFTER_FAILED_ASSERTION: AtomicBool = AtomicBool::new(false);

fn halts_midway(t: &mut TestState) -> TestFlow {
    check_eq!(t, 1, 2);
    AFTER_FAILED_ASSERTION.store(true, Ordering::SeqCst);
    check_eq!(t, 3, 4);
    Ok(())
}

#[test]
fn first_failing_assertion_halts_the_body() {
    let suite = tests![halts_midway];
    let (summary, report) = run_collecting(&suite, &plain_config());
    assert_eq!(summary.failures, 1);
    assert!(!AFTER_FAILED_ASSERTION.load(Ordering::SeqCst));
    assert_eq!(report.matches("Assertion failed").count(), 1);
}

#[test]
fn verbose_mode_names_each_test() {
    let config = Config {
        verbose: true,
        ..plain_config()
    };
    let suite = tests![passing, failing];
    let (_, report) = run_collecting(&suite, &config);
    assert!(report.contains(".  passing\n"));
    assert!(report.contains("F  failing\n"));
}
