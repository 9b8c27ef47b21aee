//! Build option schema and resolution.
//!
//! Tokens from the persisted config and the command line are consumed against
//! the declarative [`schema::OPTIONS`] table to produce a fully populated
//! [`ResolvedOptions`] record.

pub mod resolve;
pub mod schema;
pub mod types;

use thiserror::Error;

pub use resolve::{OptionValue, OptionValues, resolve, resolve_values};
pub use types::{BuildType, ResolvedOptions, TestLevel};

/// Errors raised while resolving tokens against the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
  /// Token does not name any recognized option.
  #[error("unrecognized option: {0}")]
  Unknown(String),

  /// Value is outside the option's allowed set.
  #[error("invalid value '{value}' for --{option} (choose from {})", .choices.join(", "))]
  InvalidChoice {
    option: &'static str,
    value: String,
    choices: &'static [&'static str],
  },

  #[error("--{option} expects a value")]
  MissingValue { option: &'static str },

  #[error("--{option} does not take a value (got '{value}')")]
  UnexpectedValue { option: &'static str, value: String },

  #[error("--{option} expects an integer (got '{value}')")]
  NotAnInteger { option: &'static str, value: String },
}
