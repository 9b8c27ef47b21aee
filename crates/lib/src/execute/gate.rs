//! Decides whether the test harness can run, and how.

use tracing::info;

use super::types::SkipReason;
use crate::adjust::AdjustedOptions;
use crate::consts::CI_ENV_VAR;
use crate::options::TestLevel;
use crate::platform::{Platform, paths};

/// Host/target pairs allowed to run tests besides identical tuples.
pub const ALLOWED_CROSS_PAIRS: &[(&str, &str)] = &[("x86_64-linux", "i686-linux")];

pub fn can_run_on_host(host: &Platform, target: &Platform) -> bool {
  if host == target {
    return true;
  }

  let (host, target) = (host.triple(), target.triple());
  ALLOWED_CROSS_PAIRS
    .iter()
    .any(|(allowed_host, allowed_target)| *allowed_host == host && *allowed_target == target)
}

/// Check whether the harness may run for this build.
pub fn check(adjusted: &AdjustedOptions) -> Result<(), SkipReason> {
  if adjusted.options.buildlib {
    return Err(SkipReason::LibraryBuild);
  }

  if !can_run_on_host(&adjusted.host_tuple, &adjusted.target_tuple) {
    return Err(SkipReason::IncompatibleTarget {
      host: adjusted.host_tuple.clone(),
      target: adjusted.target_tuple.clone(),
    });
  }

  Ok(())
}

/// True when running under continuous integration.
pub fn is_ci() -> bool {
  std::env::var(CI_ENV_VAR).is_ok_and(|value| value == "true")
}

/// Arguments for one test runner pass (without `--valgrind`).
///
/// CI runs are always verbose.
pub fn runner_args(adjusted: &AdjustedOptions, level: TestLevel, ci: bool) -> Vec<String> {
  let mut args = vec![paths::iotjs_binary(&adjusted.build_root).display().to_string()];

  if let Some(testsets) = adjusted.options.testsets.as_deref() {
    args.push(format!("--testsets={}", testsets));
  }

  if level == TestLevel::Quiet && !ci {
    args.push("--quiet".to_string());
  } else if ci {
    info!("CI run detected, test runner output is verbose");
  }

  args
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;
  use crate::adjust::derive_fields;
  use crate::options::resolve;
  use serial_test::serial;

  fn record(host: Platform, tokens: &[&str]) -> AdjustedOptions {
    let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    let options = resolve(&tokens, &host).unwrap();
    derive_fields(options, Path::new("/src"), &host)
  }

  fn x86_64_linux() -> Platform {
    Platform::new("x86_64", "linux")
  }

  #[test]
  fn same_tuple_runs() {
    assert!(can_run_on_host(&x86_64_linux(), &x86_64_linux()));
  }

  #[test]
  fn i686_linux_on_x86_64_linux_runs() {
    assert!(can_run_on_host(&x86_64_linux(), &Platform::new("i686", "linux")));
  }

  #[test]
  fn only_the_listed_cross_pair_runs() {
    assert!(!can_run_on_host(&x86_64_linux(), &Platform::new("arm", "nuttx")));
    assert!(!can_run_on_host(&Platform::new("i686", "linux"), &x86_64_linux()));
    assert!(!can_run_on_host(&x86_64_linux(), &Platform::new("i686", "darwin")));
  }

  #[test]
  fn library_builds_skip() {
    let adjusted = record(x86_64_linux(), &["--buildlib"]);
    assert_eq!(check(&adjusted), Err(SkipReason::LibraryBuild));
  }

  #[test]
  fn cross_targets_skip() {
    let adjusted = record(x86_64_linux(), &["--target-arch=arm"]);
    assert!(matches!(check(&adjusted), Err(SkipReason::IncompatibleTarget { .. })));
    assert_eq!(check(&record(x86_64_linux(), &["--target-arch=i686"])), Ok(()));
  }

  #[test]
  fn quiet_level_outside_ci() {
    let adjusted = record(x86_64_linux(), &["--testsets=sets.json"]);
    assert_eq!(
      runner_args(&adjusted, TestLevel::Quiet, false),
      vec![
        "/src/build/x86_64-linux/debug/bin/iotjs".to_string(),
        "--testsets=sets.json".to_string(),
        "--quiet".to_string(),
      ]
    );
  }

  #[test]
  fn ci_and_full_level_are_verbose() {
    let adjusted = record(x86_64_linux(), &[]);
    assert_eq!(runner_args(&adjusted, TestLevel::Quiet, true).len(), 1);
    assert_eq!(runner_args(&adjusted, TestLevel::Full, false).len(), 1);
  }

  #[test]
  #[serial]
  fn ci_detection_reads_env() {
    temp_env::with_var(CI_ENV_VAR, Some("true"), || assert!(is_ci()));
    temp_env::with_var(CI_ENV_VAR, Some("false"), || assert!(!is_ci()));
    temp_env::with_var(CI_ENV_VAR, None::<&str>, || assert!(!is_ci()));
  }
}
