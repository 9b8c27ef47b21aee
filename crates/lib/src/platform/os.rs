/// Embedded RTOS targets: always built as a library against a sysroot.
pub const EMBEDDED_RTOS: &[&str] = &["nuttx", "tizenrt"];

/// Desktop targets where valgrind is unavailable.
pub const WITHOUT_VALGRIND: &[&str] = &["darwin"];

/// Map a Rust OS name to the name the native build uses
pub fn build_os_name(rust_os: &'static str) -> &'static str {
  match rust_os {
    "macos" => "darwin",
    other => other,
  }
}

/// Returns the host operating system in build vocabulary
pub fn host_os() -> &'static str {
  build_os_name(std::env::consts::OS)
}

pub fn is_embedded_rtos(os: &str) -> bool {
  EMBEDDED_RTOS.contains(&os)
}

pub fn lacks_valgrind(os: &str) -> bool {
  WITHOUT_VALGRIND.contains(&os)
}
