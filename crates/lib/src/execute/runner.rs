//! External process invocation.
//!
//! Every external tool (cmake, make, git, node-gyp, the test runner) is started
//! through [`CommandRunner`], so the stage sequencing can be exercised with a
//! recording fake instead of real processes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: Option<PathBuf>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: &Path) -> Self {
    self.cwd = Some(dir.to_path_buf());
    self
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Runs an external command to completion and reports its exit code.
pub trait CommandRunner {
  /// Returns the exit code, or an error if the process could not be started.
  fn run(&mut self, invocation: &Invocation) -> std::io::Result<i32>;
}

/// Runs commands as real child processes, inheriting stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&mut self, invocation: &Invocation) -> std::io::Result<i32> {
    info!(cmd = %invocation, "executing command");

    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args);
    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    let status = command.status()?;
    match status.code() {
      Some(code) => Ok(code),
      None => {
        // Terminated by a signal.
        debug!(status = %status, "command exited without a code");
        Ok(1)
      }
    }
  }
}
