//! Persisted build configuration.
//!
//! The configuration file is a flat JSON object keyed by option name. Each entry
//! is rewritten into command-line tokens so that it can be overlaid by the
//! tokens the user actually typed: config tokens come first, CLI tokens last.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::consts::COMMA_JOINED_KEYS;
use crate::platform::paths::default_config_path;

/// Parsed configuration file, in file order.
pub type BuildConfig = Map<String, Value>;

/// Errors that can occur while loading the persisted configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("project root {} is not accessible: {source}", .path.display())]
  ProjectRoot {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("config {} must contain a JSON object", .path.display())]
  NotAnObject { path: PathBuf },

  /// Value kinds outside boolean, string, integer and list of strings.
  #[error("unsupported {kind} value for config key '{key}'")]
  UnsupportedValue { key: String, kind: &'static str },
}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> Result<BuildConfig, ConfigError> {
  let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })?;

  match value {
    Value::Object(map) => Ok(map),
    _ => Err(ConfigError::NotAnObject {
      path: path.to_path_buf(),
    }),
  }
}

/// Encode a single config entry as command-line tokens.
///
/// - `true` becomes `--key`, `false` emits nothing
/// - non-empty strings and integers become `--key=value`
/// - lists become one `--key=v` token per element, or a single comma-joined
///   token for keys in [`COMMA_JOINED_KEYS`] (nothing when empty)
pub fn value_tokens(key: &str, value: &Value) -> Result<Vec<String>, ConfigError> {
  let tokens = match value {
    Value::Bool(true) => vec![format!("--{}", key)],
    Value::Bool(false) => Vec::new(),
    Value::String(s) if s.is_empty() => Vec::new(),
    Value::String(s) => vec![format!("--{}={}", key, s)],
    Value::Number(n) if n.is_i64() || n.is_u64() => vec![format!("--{}={}", key, n)],
    Value::Number(_) => return Err(unsupported(key, "float")),
    Value::Array(items) => {
      let items = items
        .iter()
        .map(|item| item.as_str().ok_or_else(|| unsupported(key, "non-string list")))
        .collect::<Result<Vec<_>, _>>()?;

      if COMMA_JOINED_KEYS.contains(&key) {
        if items.is_empty() {
          Vec::new()
        } else {
          vec![format!("--{}={}", key, items.join(","))]
        }
      } else {
        items.iter().map(|item| format!("--{}={}", key, item)).collect()
      }
    }
    Value::Null => return Err(unsupported(key, "null")),
    Value::Object(_) => return Err(unsupported(key, "object")),
  };

  Ok(tokens)
}

fn unsupported(key: &str, kind: &'static str) -> ConfigError {
  ConfigError::UnsupportedValue {
    key: key.to_string(),
    kind,
  }
}

/// Encode a whole configuration, preserving file order.
pub fn config_tokens(config: &BuildConfig) -> Result<Vec<String>, ConfigError> {
  let mut tokens = Vec::new();
  for (key, value) in config {
    tokens.extend(value_tokens(key, value)?);
  }
  Ok(tokens)
}

/// Overlay CLI tokens on config tokens. Later tokens take precedence.
pub fn merge_tokens(config: &[String], cli: &[String]) -> Vec<String> {
  config.iter().chain(cli).cloned().collect()
}

/// The configuration file selected by the last `--config=<path>` CLI token.
pub fn config_path_override(cli: &[String]) -> Option<PathBuf> {
  cli
    .iter()
    .rev()
    .find_map(|token| token.strip_prefix("--config="))
    .map(PathBuf::from)
}

/// Load the selected configuration and produce the merged token sequence.
pub fn load_tokens(root: &Path, cli: &[String]) -> Result<Vec<String>, ConfigError> {
  let path = config_path_override(cli).unwrap_or_else(|| default_config_path(root));
  debug!(path = %path.display(), "loading build config");

  let config = load_config(&path)?;
  let config_tokens = config_tokens(&config)?;
  debug!(tokens = ?config_tokens, "config tokens");

  Ok(merge_tokens(&config_tokens, cli))
}
