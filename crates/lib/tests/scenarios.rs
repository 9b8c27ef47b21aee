//! End-to-end build scenarios driven through the public pipeline API.
//!
//! A scripted runner stands in for cmake, make, git and the test harness so
//! each scenario can assert on the exact sequence of external commands.

use std::fs;
use std::io;
use std::path::Path;

use iotbuild_lib::Error;
use iotbuild_lib::execute::{CommandRunner, ExecuteError, Invocation, RunConfig, SkipReason, Stage, TestOutcome};
use iotbuild_lib::pipeline;
use iotbuild_lib::platform::Platform;
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedRunner {
  commands: Vec<String>,
  fail: Option<(&'static str, i32)>,
}

impl ScriptedRunner {
  fn failing(program: &'static str, code: i32) -> Self {
    Self {
      commands: Vec::new(),
      fail: Some((program, code)),
    }
  }

  fn programs(&self) -> Vec<&str> {
    self
      .commands
      .iter()
      .map(|command| command.split_whitespace().next().unwrap_or_default())
      .collect()
  }
}

impl CommandRunner for ScriptedRunner {
  fn run(&mut self, invocation: &Invocation) -> io::Result<i32> {
    self.commands.push(invocation.to_string());
    match self.fail {
      Some((program, code)) if invocation.program == program => Ok(code),
      _ => Ok(0),
    }
  }
}

fn host() -> Platform {
  Platform::new("x86_64", "linux")
}

fn project(config: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join("build.config"), config).unwrap();
  temp
}

fn args(tokens: &[&str]) -> Vec<String> {
  tokens.iter().map(|token| token.to_string()).collect()
}

fn add_addon(root: &Path, name: &str) {
  let dir = root.join("test/addons-napi").join(name);
  fs::create_dir_all(&dir).unwrap();
  fs::write(dir.join("binding.gyp"), "{}").unwrap();
}

mod default_build {
  use super::*;

  #[test]
  fn runs_submodules_cmake_make() {
    let temp = project("{}");
    let mut runner = ScriptedRunner::default();

    let (adjusted, report) =
      pipeline::build(temp.path(), &[], &host(), &mut runner, RunConfig::default()).unwrap();

    assert_eq!(runner.programs(), vec!["git", "git", "cmake", "make"]);
    assert_eq!(report.tests, TestOutcome::NotRequested);
    let root = dunce::canonicalize(temp.path()).unwrap();
    assert_eq!(adjusted.project_root, root);
    assert_eq!(adjusted.build_root, root.join("build/x86_64-linux/debug"));
    assert!(runner.commands[3].ends_with("/build/x86_64-linux/debug -j"));
  }

  #[test]
  fn no_init_submodule_skips_git() {
    let temp = project(r#"{"no-init-submodule": true, "no-parallel-build": true}"#);
    let mut runner = ScriptedRunner::default();

    pipeline::build(temp.path(), &[], &host(), &mut runner, RunConfig::default()).unwrap();

    assert_eq!(runner.programs(), vec!["cmake", "make"]);
    assert!(!runner.commands[1].ends_with(" -j"));
  }

  #[test]
  fn clean_removes_build_root_first() {
    let temp = project("{}");
    let stale = temp.path().join("build/x86_64-linux/release/stale.o");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "").unwrap();

    let mut runner = ScriptedRunner::default();
    let cli = args(&["--clean", "--buildtype=release"]);
    pipeline::build(temp.path(), &cli, &host(), &mut runner, RunConfig::default()).unwrap();

    assert!(!stale.exists());
  }
}

mod test_gate {
  use super::*;

  #[test]
  fn native_run_test_builds_addons_and_runs_both_passes() {
    let temp = project("{}");
    add_addon(temp.path(), "b_addon");
    add_addon(temp.path(), "a_addon");
    fs::create_dir_all(temp.path().join("test/addons-napi/not_an_addon")).unwrap();

    let mut runner = ScriptedRunner::default();
    let cli = args(&["--run-test", "--no-init-submodule"]);
    let (_, report) = pipeline::build(temp.path(), &cli, &host(), &mut runner, RunConfig::default()).unwrap();

    assert_eq!(report.tests, TestOutcome::Passed);
    // cmake, make, napi module (2), two addons (2 each), unit and valgrind passes
    assert_eq!(runner.commands.len(), 10);
    assert_eq!(runner.commands.iter().filter(|c| c.ends_with("node-gyp configure")).count(), 3);
    assert!(runner.commands[8].contains("testrunner.py"));
    assert!(!runner.commands[8].contains("--valgrind"));
    assert!(runner.commands[9].contains("--valgrind"));
  }

  #[test]
  fn quiet_level_adds_quiet_outside_ci() {
    let temp = project(r#"{"no-init-submodule": true, "no-check-valgrind": true}"#);

    let mut runner = ScriptedRunner::default();
    let cli = args(&["--run-test=quiet"]);
    let local = RunConfig {
      ci: false,
      ..RunConfig::default()
    };
    pipeline::build(temp.path(), &cli, &host(), &mut runner, local).unwrap();
    assert!(runner.commands.last().unwrap().ends_with("--quiet"));

    let mut runner = ScriptedRunner::default();
    let ci = RunConfig {
      ci: true,
      ..RunConfig::default()
    };
    pipeline::build(temp.path(), &cli, &host(), &mut runner, ci).unwrap();
    assert!(!runner.commands.last().unwrap().contains("--quiet"));
  }

  #[test]
  fn cross_target_skips_tests() {
    let temp = project(r#"{"no-init-submodule": true}"#);
    let mut runner = ScriptedRunner::default();
    let cli = args(&["--run-test", "--target-arch=arm"]);

    let (_, report) = pipeline::build(temp.path(), &cli, &host(), &mut runner, RunConfig::default()).unwrap();

    assert_eq!(runner.programs(), vec!["cmake", "make"]);
    assert!(matches!(report.tests, TestOutcome::Skipped(SkipReason::IncompatibleTarget { .. })));
  }

  #[test]
  fn i686_target_runs_on_x86_64_linux() {
    let temp = project(r#"{"no-init-submodule": true, "no-check-valgrind": true}"#);
    let mut runner = ScriptedRunner::default();
    let cli = args(&["--run-test", "--target-arch=x86"]);

    let (adjusted, report) =
      pipeline::build(temp.path(), &cli, &host(), &mut runner, RunConfig::default()).unwrap();

    assert_eq!(adjusted.target_tuple.triple(), "i686-linux");
    assert_eq!(report.tests, TestOutcome::Passed);
  }

  #[test]
  fn library_build_skips_tests() {
    let temp = project(r#"{"no-init-submodule": true, "buildlib": true}"#);
    let mut runner = ScriptedRunner::default();
    let cli = args(&["--run-test"]);

    let (_, report) = pipeline::build(temp.path(), &cli, &host(), &mut runner, RunConfig::default()).unwrap();

    assert_eq!(report.tests, TestOutcome::Skipped(SkipReason::LibraryBuild));
    assert_eq!(runner.programs(), vec!["cmake", "make"]);
  }
}

mod failures {
  use super::*;

  #[test]
  fn cmake_failure_stops_before_make() {
    let temp = project(r#"{"no-init-submodule": true}"#);
    let mut runner = ScriptedRunner::failing("cmake", 2);

    let err = pipeline::build(temp.path(), &[], &host(), &mut runner, RunConfig::default()).unwrap_err();

    assert_eq!(runner.programs(), vec!["cmake"]);
    assert!(matches!(
      err,
      Error::Execute(ExecuteError::Failed {
        stage: Stage::Configure,
        code: 2,
        ..
      })
    ));
    assert_eq!(err.exit_code(), 2);
  }

  #[test]
  fn missing_sysroot_path_fails_without_running_anything() {
    let temp = project("{}");
    let missing = temp.path().join("no-such-nuttx");
    let mut runner = ScriptedRunner::default();
    let cli = vec![
      "--target-os=nuttx".to_string(),
      "--target-arch=arm".to_string(),
      format!("--sysroot={}", missing.display()),
    ];

    let err = pipeline::build(temp.path(), &cli, &host(), &mut runner, RunConfig::default()).unwrap_err();

    assert!(matches!(err, Error::Adjust(_)));
    assert!(runner.commands.is_empty());
  }

  #[test]
  fn nuttx_with_sysroot_builds_library_only() {
    let temp = project(r#"{"no-init-submodule": true}"#);
    let sysroot = temp.path().join("nuttx");
    fs::create_dir_all(&sysroot).unwrap();
    let mut runner = ScriptedRunner::default();
    let cli = vec![
      "--target-os=nuttx".to_string(),
      "--target-arch=arm".to_string(),
      "--target-board=stm32f4dis".to_string(),
      format!("--sysroot={}", sysroot.display()),
      "--run-test".to_string(),
    ];

    let (adjusted, report) =
      pipeline::build(temp.path(), &cli, &host(), &mut runner, RunConfig::default()).unwrap();

    assert!(adjusted.options.buildlib);
    assert_eq!(adjusted.options.sysroot, Some(dunce::canonicalize(&sysroot).unwrap().display().to_string()));
    assert_eq!(report.tests, TestOutcome::Skipped(SkipReason::LibraryBuild));
    assert!(runner.commands[0].contains("-DBUILD_LIB_ONLY=ON"));
  }
}
