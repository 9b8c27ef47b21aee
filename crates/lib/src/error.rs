use thiserror::Error;

use crate::adjust::AdjustError;
use crate::config::ConfigError;
use crate::execute::ExecuteError;
use crate::options::OptionError;

/// Any failure that aborts a run.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Option(#[from] OptionError),

  #[error(transparent)]
  Adjust(#[from] AdjustError),

  #[error(transparent)]
  Execute(#[from] ExecuteError),
}

impl Error {
  /// Process exit code for this failure.
  ///
  /// External tool failures propagate their own code.
  pub fn exit_code(&self) -> i32 {
    match self {
      Error::Execute(err) => err.exit_code(),
      _ => 1,
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
