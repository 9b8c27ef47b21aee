//! Deterministic locations derived from the project root.

use std::path::{Path, PathBuf};

use crate::consts::{
  BUILD_CONFIG_FILE, CMAKE_CONFIG_DIR, JERRY_PROFILE_DIR, NAPI_ADDONS_DIR, NAPI_TEST_MODULE_DIR, NODE_GYP, TEST_RUNNER,
  TOOLS_DIR,
};
use crate::platform::Platform;

/// Returns the persisted configuration used when `--config` is absent
pub fn default_config_path(root: &Path) -> PathBuf {
  root.join(BUILD_CONFIG_FILE)
}

/// Output directory for one target and build type.
///
/// An absolute `builddir` replaces the project root.
pub fn build_root(root: &Path, builddir: &str, target: &Platform, buildtype: &str) -> PathBuf {
  root.join(builddir).join(target.triple()).join(buildtype)
}

pub fn toolchain_file(root: &Path, target: &Platform) -> PathBuf {
  root.join(CMAKE_CONFIG_DIR).join(format!("{}.cmake", target.triple()))
}

pub fn jerry_profile(root: &Path, profile: &str) -> PathBuf {
  root.join(JERRY_PROFILE_DIR).join(format!("{}.profile", profile))
}

pub fn test_runner(root: &Path) -> PathBuf {
  root.join(TOOLS_DIR).join(TEST_RUNNER)
}

pub fn node_gyp(root: &Path) -> PathBuf {
  root.join(NODE_GYP)
}

pub fn napi_test_module(root: &Path) -> PathBuf {
  root.join(NAPI_TEST_MODULE_DIR)
}

pub fn napi_addons(root: &Path) -> PathBuf {
  root.join(NAPI_ADDONS_DIR)
}

/// The runtime binary produced under a build root
pub fn iotjs_binary(build_root: &Path) -> PathBuf {
  build_root.join("bin").join("iotjs")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn build_root_nests_tuple_and_type() {
    let target = Platform::new("arm", "nuttx");
    assert_eq!(
      build_root(Path::new("/src"), "build", &target, "release"),
      PathBuf::from("/src/build/arm-nuttx/release")
    );
  }

  #[test]
  fn absolute_builddir_replaces_root() {
    let target = Platform::new("x86_64", "linux");
    assert_eq!(
      build_root(Path::new("/src"), "/tmp/out", &target, "debug"),
      PathBuf::from("/tmp/out/x86_64-linux/debug")
    );
  }

  #[test]
  fn toolchain_and_profile_paths() {
    let target = Platform::new("i686", "linux");
    assert_eq!(
      toolchain_file(Path::new("/src"), &target),
      PathBuf::from("/src/cmake/config/i686-linux.cmake")
    );
    assert_eq!(
      jerry_profile(Path::new("/src"), "es5.1"),
      PathBuf::from("/src/deps/jerry/jerry-core/profiles/es5.1.profile")
    );
  }
}
