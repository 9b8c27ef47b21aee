//! End-to-end flow: config -> tokens -> resolved -> adjusted -> build.
//!
//! Every validation happens in [`prepare`], before any external process is
//! started. The project root is made absolute there, since external tools run
//! with their own working directories.

use std::path::Path;

use tracing::debug;

use crate::adjust::{AdjustedOptions, adjust};
use crate::config::{ConfigError, load_tokens};
use crate::error::Result;
use crate::execute::{BuildReport, CommandRunner, RunConfig, run_build};
use crate::options::resolve;
use crate::platform::Platform;

/// Load the configuration, overlay CLI tokens and produce the adjusted record.
pub fn prepare(project_root: &Path, cli: &[String], host: &Platform) -> Result<AdjustedOptions> {
  let project_root = dunce::canonicalize(project_root).map_err(|source| ConfigError::ProjectRoot {
    path: project_root.to_path_buf(),
    source,
  })?;
  debug!(project_root = %project_root.display(), "resolved project root");

  let tokens = load_tokens(&project_root, cli)?;
  debug!(?tokens, "merged tokens");

  let options = resolve(&tokens, host)?;
  Ok(adjust(options, &project_root, host)?)
}

/// Prepare options and run every requested build stage.
pub fn build<R: CommandRunner>(
  project_root: &Path,
  cli: &[String],
  host: &Platform,
  runner: &mut R,
  config: RunConfig,
) -> Result<(AdjustedOptions, BuildReport)> {
  let adjusted = prepare(project_root, cli, host)?;
  let report = run_build(runner, &adjusted, config)?;
  Ok((adjusted, report))
}
