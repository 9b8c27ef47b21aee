//! Build orchestration.
//!
//! Runs the external tools for an adjusted option record and decides whether
//! the test harness may run on this host.

pub mod build;
pub mod gate;
pub mod runner;
pub mod types;

pub use build::{RunConfig, run_build};
pub use runner::{CommandRunner, Invocation, SystemRunner};
pub use types::{BuildReport, ExecuteError, SkipReason, Stage, TestOutcome};
