//! Types for build orchestration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::platform::Platform;

/// Side-effecting steps of a build run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Clean,
  Submodule,
  Configure,
  Make,
  TestDependencies,
  UnitTests,
  ValgrindTests,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Stage::Clean => "clean build directory",
      Stage::Submodule => "initialize submodules",
      Stage::Configure => "configure IoT.js",
      Stage::Make => "build IoT.js",
      Stage::TestDependencies => "build test dependencies",
      Stage::UnitTests => "unit tests",
      Stage::ValgrindTests => "unit tests in valgrind environment",
    };
    write!(f, "{}", name)
  }
}

/// Errors that abort a build run.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// External tool exited non-zero.
  #[error("{stage} failed: {program} exited with code {code}")]
  Failed { stage: Stage, program: String, code: i32 },

  /// External tool could not be started.
  #[error("{stage} failed: could not run {program}: {source}")]
  Spawn {
    stage: Stage,
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to clean build directory {}: {source}", .path.display())]
  Clean {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to scan addon directory {}: {source}", .path.display())]
  Scan {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

impl ExecuteError {
  /// Exit code to propagate from the binary.
  pub fn exit_code(&self) -> i32 {
    match self {
      ExecuteError::Failed { code, .. } => *code,
      _ => 1,
    }
  }
}

/// Why the test harness was not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
  /// A library artifact has no runnable binary.
  LibraryBuild,
  /// Target binaries cannot run on this host.
  IncompatibleTarget { host: Platform, target: Platform },
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::LibraryBuild => write!(f, "Skip unit tests - build target is library"),
      SkipReason::IncompatibleTarget { host, target } => {
        write!(f, "Skip unit tests - target-host pair is not allowed ({} on {})", target, host)
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
  NotRequested,
  Skipped(SkipReason),
  Passed,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct BuildReport {
  pub elapsed: Duration,
  pub tests: TestOutcome,
}
