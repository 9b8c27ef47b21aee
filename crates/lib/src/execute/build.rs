//! Sequencing of the side-effecting build stages.
//!
//! `clean? -> submodules? -> cmake -> make -> test gate`. The first external
//! command that exits non-zero aborts the run; nothing is retried or undone.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;
use walkdir::WalkDir;

use super::gate;
use super::runner::{CommandRunner, Invocation};
use super::types::{BuildReport, ExecuteError, Stage, TestOutcome};
use crate::adjust::AdjustedOptions;
use crate::cmake::cmake_args;
use crate::consts::ADDON_DESCRIPTOR;
use crate::options::TestLevel;
use crate::platform::paths;

/// Settings for a build run that do not come from build options.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
  /// Running under continuous integration.
  pub ci: bool,
  /// Called with the name of each stage as it starts.
  pub progress: fn(&str),
}

impl Default for RunConfig {
  fn default() -> Self {
    Self {
      ci: false,
      progress: |_| {},
    }
  }
}

/// Run one command and turn a non-zero exit into a fatal error.
fn check_run<R: CommandRunner>(runner: &mut R, stage: Stage, invocation: Invocation) -> Result<(), ExecuteError> {
  match runner.run(&invocation) {
    Ok(0) => Ok(()),
    Ok(code) => Err(ExecuteError::Failed {
      stage,
      program: invocation.program,
      code,
    }),
    Err(source) => Err(ExecuteError::Spawn {
      stage,
      program: invocation.program,
      source,
    }),
  }
}

/// Remove the build root. A missing directory is already clean.
pub fn clean_build_root(build_root: &Path) -> Result<(), ExecuteError> {
  debug!(path = %build_root.display(), "clearing build directory");
  match fs::remove_dir_all(build_root) {
    Ok(()) => Ok(()),
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
    Err(source) => Err(ExecuteError::Clean {
      path: build_root.to_path_buf(),
      source,
    }),
  }
}

pub fn init_submodules<R: CommandRunner>(runner: &mut R, project_root: &Path) -> Result<(), ExecuteError> {
  for step in ["init", "update"] {
    let invocation = Invocation::new("git").args(["submodule", step]).current_dir(project_root);
    check_run(runner, Stage::Submodule, invocation)?;
  }
  Ok(())
}

/// Configure with cmake, then build (and optionally install) with make.
pub fn build_iotjs<R: CommandRunner>(runner: &mut R, adjusted: &AdjustedOptions) -> Result<(), ExecuteError> {
  debug!(target_tuple = %adjusted.target_tuple, buildtype = %adjusted.options.buildtype, "building iotjs");

  let configure = Invocation::new("cmake")
    .args(cmake_args(adjusted))
    .current_dir(&adjusted.project_root);
  check_run(runner, Stage::Configure, configure)?;

  let mut make = Invocation::new("make").arg("-C").arg(adjusted.build_root.display().to_string());
  if adjusted.options.install {
    make = make.arg("install");
  }
  if !adjusted.options.no_parallel_build {
    make = make.arg("-j");
  }
  check_run(runner, Stage::Make, make)
}

/// Addon directories holding a build descriptor, in name order.
pub fn addon_dirs(addons_root: &Path) -> Result<Vec<PathBuf>, ExecuteError> {
  if !addons_root.is_dir() {
    return Ok(Vec::new());
  }

  let mut dirs = Vec::new();
  for entry in WalkDir::new(addons_root).min_depth(1).max_depth(1).sort_by_file_name() {
    let entry = entry.map_err(|source| ExecuteError::Scan {
      path: addons_root.to_path_buf(),
      source,
    })?;
    if entry.file_type().is_dir() && entry.path().join(ADDON_DESCRIPTOR).is_file() {
      dirs.push(entry.into_path());
    }
  }
  Ok(dirs)
}

fn node_gyp_build<R: CommandRunner>(runner: &mut R, node_gyp: &str, dir: &Path) -> Result<(), ExecuteError> {
  for step in ["configure", "build"] {
    let invocation = Invocation::new(node_gyp).arg(step).current_dir(dir);
    check_run(runner, Stage::TestDependencies, invocation)?;
  }
  Ok(())
}

/// Build the N-API test module and every test addon.
pub fn build_test_dependencies<R: CommandRunner>(runner: &mut R, project_root: &Path) -> Result<(), ExecuteError> {
  let node_gyp = paths::node_gyp(project_root).display().to_string();
  debug!(node_gyp = %node_gyp, "building test dependencies");

  node_gyp_build(runner, &node_gyp, &paths::napi_test_module(project_root))?;
  for dir in addon_dirs(&paths::napi_addons(project_root))? {
    node_gyp_build(runner, &node_gyp, &dir)?;
  }
  Ok(())
}

/// Run the harness normally, then under valgrind unless disabled.
pub fn run_checktest<R: CommandRunner>(
  runner: &mut R,
  adjusted: &AdjustedOptions,
  level: TestLevel,
  config: RunConfig,
) -> Result<(), ExecuteError> {
  let test_runner = paths::test_runner(&adjusted.project_root).display().to_string();
  let args = gate::runner_args(adjusted, level, config.ci);

  let unit = Invocation::new(test_runner.as_str())
    .args(args.iter().cloned())
    .current_dir(&adjusted.project_root);
  check_run(runner, Stage::UnitTests, unit)?;

  if !adjusted.options.no_check_valgrind {
    let valgrind = Invocation::new(test_runner.as_str())
      .arg("--valgrind")
      .args(args)
      .current_dir(&adjusted.project_root);
    check_run(runner, Stage::ValgrindTests, valgrind)?;
  }

  Ok(())
}

/// Run every requested stage for an adjusted option record.
pub fn run_build<R: CommandRunner>(
  runner: &mut R,
  adjusted: &AdjustedOptions,
  config: RunConfig,
) -> Result<BuildReport, ExecuteError> {
  let started = Instant::now();
  let options = &adjusted.options;

  let progress = config.progress;

  if options.clean {
    progress("Clear build directory");
    clean_build_root(&adjusted.build_root)?;
  }

  if !options.no_init_submodule {
    progress("Initialize submodule");
    init_submodules(runner, &adjusted.project_root)?;
  }

  progress("Build IoT.js");
  build_iotjs(runner, adjusted)?;
  debug!(elapsed = ?started.elapsed(), "iotjs build finished");

  let tests = match options.run_test {
    None => TestOutcome::NotRequested,
    Some(level) => match gate::check(adjusted) {
      Err(reason) => {
        debug!(%reason, "tests skipped");
        TestOutcome::Skipped(reason)
      }
      Ok(()) => {
        progress("Build test dependencies");
        build_test_dependencies(runner, &adjusted.project_root)?;
        progress("Run tests");
        run_checktest(runner, adjusted, level, config)?;
        TestOutcome::Passed
      }
    },
  };

  Ok(BuildReport {
    elapsed: started.elapsed(),
    tests,
  })
}
