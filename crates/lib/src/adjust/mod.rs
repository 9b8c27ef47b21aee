//! Normalization and validation of resolved options.
//!
//! Each rule is a small function that takes the record by value and returns a
//! new one. [`adjust`] composes them in a fixed order; later rules observe the
//! outcome of earlier ones.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::NAPI_TESTSETS;
use crate::options::ResolvedOptions;
use crate::platform::paths;
use crate::platform::{Platform, arch, is_low_resource_board, os};

/// Fatal precondition failures found while adjusting options.
#[derive(Debug, Error)]
pub enum AdjustError {
  #[error("--sysroot needed for {os} target")]
  MissingSysroot { os: String },

  #[error("{os} sysroot {} does not exist", .path.display())]
  SysrootNotFound {
    os: String,
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Resolved options plus the fields derived from them.
///
/// Produced once per run and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustedOptions {
  #[serde(flatten)]
  pub options: ResolvedOptions,
  pub project_root: PathBuf,
  pub host_tuple: Platform,
  pub target_tuple: Platform,
  pub build_root: PathBuf,
  pub toolchain_file: PathBuf,
  pub jerry_profile_path: PathBuf,
}

impl AdjustedOptions {
  pub fn is_embedded_rtos(&self) -> bool {
    os::is_embedded_rtos(&self.options.target_os)
  }
}

/// Embedded RTOS targets build a library against an existing sysroot.
///
/// A relative sysroot is taken relative to the project root.
pub fn require_sysroot(options: ResolvedOptions, project_root: &Path) -> Result<ResolvedOptions, AdjustError> {
  if !os::is_embedded_rtos(&options.target_os) {
    return Ok(options);
  }

  let sysroot = match options.sysroot.as_deref() {
    Some(sysroot) if !sysroot.is_empty() => sysroot,
    _ => {
      return Err(AdjustError::MissingSysroot {
        os: options.target_os.clone(),
      });
    }
  };

  let absolute = dunce::canonicalize(project_root.join(sysroot)).map_err(|source| AdjustError::SysrootNotFound {
    os: options.target_os.clone(),
    path: PathBuf::from(sysroot),
    source,
  })?;

  Ok(ResolvedOptions {
    buildlib: true,
    sysroot: Some(absolute.to_string_lossy().into_owned()),
    ..options
  })
}

pub fn normalize_target_arch(options: ResolvedOptions) -> ResolvedOptions {
  let target_arch = arch::normalize(&options.target_arch).to_string();
  ResolvedOptions { target_arch, ..options }
}

pub fn skip_valgrind_for_os(options: ResolvedOptions) -> ResolvedOptions {
  let no_check_valgrind = options.no_check_valgrind || os::lacks_valgrind(&options.target_os);
  ResolvedOptions {
    no_check_valgrind,
    ..options
  }
}

pub fn skip_valgrind_for_board(options: ResolvedOptions) -> ResolvedOptions {
  let low_resource = options.target_board.as_deref().is_some_and(is_low_resource_board);
  ResolvedOptions {
    no_check_valgrind: options.no_check_valgrind || low_resource,
    ..options
  }
}

/// N-API builds need JerryX and run the N-API testsets by default.
pub fn enable_napi_companions(options: ResolvedOptions) -> ResolvedOptions {
  if !options.napi {
    return options;
  }

  let testsets = options.testsets.clone().or_else(|| Some(NAPI_TESTSETS.to_string()));
  ResolvedOptions {
    jerryx: true,
    testsets,
    ..options
  }
}

/// Attach tuples and the paths derived from them.
pub fn derive_fields(options: ResolvedOptions, project_root: &Path, host: &Platform) -> AdjustedOptions {
  let target_tuple = Platform::new(options.target_arch.clone(), options.target_os.clone());
  let build_root = paths::build_root(project_root, &options.builddir, &target_tuple, options.buildtype.as_str());
  let toolchain_file = paths::toolchain_file(project_root, &target_tuple);
  let jerry_profile_path = paths::jerry_profile(project_root, &options.jerry_profile);

  AdjustedOptions {
    options,
    project_root: project_root.to_path_buf(),
    host_tuple: host.clone(),
    target_tuple,
    build_root,
    toolchain_file,
    jerry_profile_path,
  }
}

/// Run every adjustment rule in order.
pub fn adjust(options: ResolvedOptions, project_root: &Path, host: &Platform) -> Result<AdjustedOptions, AdjustError> {
  let options = require_sysroot(options, project_root)?;
  let options = normalize_target_arch(options);
  let options = skip_valgrind_for_os(options);
  let options = skip_valgrind_for_board(options);
  let options = enable_napi_companions(options);

  let adjusted = derive_fields(options, project_root, host);
  debug!(
    host = %adjusted.host_tuple,
    target_tuple = %adjusted.target_tuple,
    build_root = %adjusted.build_root.display(),
    "options adjusted"
  );
  Ok(adjusted)
}
