//! Test utilities for iotbuild-lib.
//!
//! Cross-platform shell helpers plus a [`RecordingRunner`] that stands in for
//! real external tools.

use crate::execute::{CommandRunner, Invocation};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// Records every invocation and returns scripted exit codes.
///
/// Commands succeed unless their rendered command line contains a pattern
/// registered with [`RecordingRunner::fail_when`].
#[derive(Debug, Default)]
pub struct RecordingRunner {
  pub calls: Vec<Invocation>,
  failures: Vec<(String, i32)>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail_when(mut self, pattern: &str, code: i32) -> Self {
    self.failures.push((pattern.to_string(), code));
    self
  }

  /// Rendered command lines, in call order.
  pub fn commands(&self) -> Vec<String> {
    self.calls.iter().map(|call| call.to_string()).collect()
  }
}

impl CommandRunner for RecordingRunner {
  fn run(&mut self, invocation: &Invocation) -> std::io::Result<i32> {
    self.calls.push(invocation.clone());
    let rendered = invocation.to_string();
    let code = self
      .failures
      .iter()
      .find(|(pattern, _)| rendered.contains(pattern.as_str()))
      .map_or(0, |(_, code)| *code);
    Ok(code)
  }
}
