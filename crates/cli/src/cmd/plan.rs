//! Implementation of the `iotbuild plan` command.
//!
//! Performs every validation `build` does and prints the result, without
//! starting any external process.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use iotbuild_lib::cmake::cmake_args;
use iotbuild_lib::execute::gate;
use iotbuild_lib::pipeline;
use iotbuild_lib::platform::Platform;

use crate::output::{OutputFormat, format_command, print_json, print_stat, symbols};

pub fn cmd_plan(project_root: &Path, options: &[String], format: OutputFormat) -> Result<()> {
  let host = Platform::current();
  let adjusted = pipeline::prepare(project_root, options, &host)?;
  let args = cmake_args(&adjusted);
  debug!(arg_count = args.len(), "synthesized cmake command");

  if format.is_json() {
    let json = serde_json::json!({ "options": adjusted, "cmake_args": args });
    return print_json(&json);
  }

  println!("Plan:");
  print_stat("Host", &adjusted.host_tuple.triple());
  print_stat("Target", &adjusted.target_tuple.triple());
  print_stat("Build type", adjusted.options.buildtype.as_str());
  print_stat("Build root", &adjusted.build_root.display().to_string());
  print_stat("Toolchain", &adjusted.toolchain_file.display().to_string());
  print_stat("Library only", &adjusted.options.buildlib.to_string());

  let tests = match (adjusted.options.run_test, gate::check(&adjusted)) {
    (None, _) => "not requested".to_string(),
    (Some(_), Ok(())) => "run".to_string(),
    (Some(_), Err(reason)) => reason.to_string(),
  };
  print_stat("Tests", &tests);

  println!();
  println!("{} {}", symbols::ARROW, format_command("cmake", &args));
  Ok(())
}
