pub mod arch;
pub mod os;
pub mod paths;

use std::fmt;

use serde::Serialize;

/// Boards too small to host valgrind runs.
pub const LOW_RESOURCE_BOARDS: &[&str] = &["rpi2", "artik10", "artik05x"];

/// Platform tuple combining architecture and OS (e.g., "x86_64-linux")
///
/// Target values come from user input and are not limited to the host
/// vocabulary, so both halves are kept as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Platform {
  pub arch: String,
  pub os: String,
}

impl Platform {
  /// Create a new platform tuple
  pub fn new(arch: impl Into<String>, os: impl Into<String>) -> Self {
    Self {
      arch: arch.into(),
      os: os.into(),
    }
  }

  /// Detect the host platform, named in the build vocabulary
  pub fn current() -> Self {
    Self::new(arch::host_arch(), os::host_os())
  }

  /// Returns the tuple string (e.g., "x86_64-linux")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// Returns true if the board cannot run the memory checker.
pub fn is_low_resource_board(board: &str) -> bool {
  LOW_RESOURCE_BOARDS.contains(&board)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn platform_triple_format() {
    let platform = Platform::new("x86_64", "linux");
    assert_eq!(platform.triple(), "x86_64-linux");

    let platform = Platform::new("arm", "nuttx");
    assert_eq!(platform.to_string(), "arm-nuttx");
  }

  #[test]
  fn low_resource_boards() {
    assert!(is_low_resource_board("rpi2"));
    assert!(is_low_resource_board("artik05x"));
    assert!(!is_low_resource_board("stm32f4dis"));
  }
}
