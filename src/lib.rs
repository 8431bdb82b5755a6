pub use crate::assert::{check, Relation, Render};
pub use crate::config::Config;
pub use crate::errors::HarnessError;
pub use crate::harness::{run_suite, run_test, Summary, Verdict};
pub use crate::suite::{Halt, Test, TestBody, TestFlow, TestState};

pub mod assert;
pub mod capture;
pub mod cli;
pub mod config;
pub mod errors;
pub mod harness;
pub mod suite;
