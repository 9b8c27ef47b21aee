mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// iotbuild - build front end for IoT.js
#[derive(Parser)]
#[command(name = "iotbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Project root holding build.config, cmake/ and tools/
  #[arg(short = 'C', long, global = true, env = "IOTBUILD_PROJECT_ROOT", default_value = ".")]
  project_root: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure, build and optionally test IoT.js
  Build {
    /// Build options, e.g. --buildtype=release --run-test (see `iotbuild options`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    options: Vec<String>,
  },

  /// Show resolved options and the cmake command without running anything
  Plan {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Build options, as for `build`. Everything from the first build option on
    /// is read as a build option, so `--format` goes before them
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    options: Vec<String>,
  },

  /// List every recognized build option
  Options,

  /// Show the detected host platform
  Info,
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Build { options } => cmd::cmd_build(&cli.project_root, &options),
    Commands::Plan { format, options } => cmd::cmd_plan(&cli.project_root, &options, format),
    Commands::Options => {
      cmd::cmd_options();
      Ok(())
    }
    Commands::Info => {
      cmd::cmd_info();
      Ok(())
    }
  }
}

/// Exit code for a failed run; external tool codes pass through.
fn exit_code(err: &anyhow::Error) -> u8 {
  err
    .downcast_ref::<iotbuild_lib::Error>()
    .and_then(|err| u8::try_from(err.exit_code()).ok())
    .filter(|code| *code != 0)
    .unwrap_or(1)
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::from(exit_code(&err))
    }
  }
}
