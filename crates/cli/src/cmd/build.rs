//! Implementation of the `iotbuild build` command.
//!
//! Resolves the build options, runs cmake and make, and runs the test harness
//! when requested and supported by the host.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use iotbuild_lib::execute::gate::is_ci;
use iotbuild_lib::execute::{RunConfig, SystemRunner, TestOutcome};
use iotbuild_lib::pipeline;
use iotbuild_lib::platform::Platform;

use crate::output::{print_info, print_progress, print_success, print_warning};

pub fn cmd_build(project_root: &Path, options: &[String]) -> Result<()> {
  let host = Platform::current();
  let config = RunConfig {
    ci: is_ci(),
    progress: print_progress,
  };
  debug!(project_root = %project_root.display(), ?options, ci = config.ci, "build requested");

  let (adjusted, report) = pipeline::build(project_root, options, &host, &mut SystemRunner, config)?;

  let elapsed = Duration::from_secs(report.elapsed.as_secs());
  print_success(&format!(
    "IoT.js Build Succeeded!! ({})",
    humantime::format_duration(elapsed)
  ));

  match report.tests {
    TestOutcome::Passed => print_success("Unit tests passed"),
    TestOutcome::Skipped(reason) => print_warning(&reason.to_string()),
    TestOutcome::NotRequested => {
      print_info("To run tests use '--run-test' or the following command:");
      println!();
      println!(
        "    tools/testrunner.py {}/{}/{}/bin/iotjs",
        adjusted.options.builddir, adjusted.target_tuple, adjusted.options.buildtype
      );
      println!();
    }
  }

  Ok(())
}
