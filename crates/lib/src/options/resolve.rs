//! Generic resolution of tokens against the option table.

use std::collections::BTreeMap;

use tracing::debug;

use super::OptionError;
use super::schema::{DefaultValue, OPTIONS, OptionDescriptor, ValueKind, find_long, find_short};
use super::types::ResolvedOptions;
use crate::platform::Platform;

/// Value stored for one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
  Flag(bool),
  Text(Option<String>),
  Integer(Option<i64>),
  List(Vec<String>),
}

/// Untyped resolution result keyed by destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionValues(BTreeMap<&'static str, OptionValue>);

impl OptionValues {
  /// Seed every destination with its schema default.
  pub fn defaults(host: &Platform) -> Self {
    let mut values = BTreeMap::new();
    for descriptor in OPTIONS {
      values
        .entry(descriptor.dest)
        .or_insert_with(|| default_value(descriptor, host));
    }
    Self(values)
  }

  pub fn get(&self, dest: &str) -> Option<&OptionValue> {
    self.0.get(dest)
  }

  pub fn flag(&self, dest: &str) -> bool {
    matches!(self.0.get(dest), Some(OptionValue::Flag(true)))
  }

  pub fn text(&self, dest: &str) -> Option<&str> {
    match self.0.get(dest) {
      Some(OptionValue::Text(text)) => text.as_deref(),
      _ => None,
    }
  }

  pub fn integer(&self, dest: &str) -> Option<i64> {
    match self.0.get(dest) {
      Some(OptionValue::Integer(value)) => *value,
      _ => None,
    }
  }

  pub fn list(&self, dest: &str) -> &[String] {
    match self.0.get(dest) {
      Some(OptionValue::List(items)) => items,
      _ => &[],
    }
  }
}

fn default_value(descriptor: &OptionDescriptor, host: &Platform) -> OptionValue {
  match (descriptor.kind, descriptor.default) {
    (ValueKind::Flag, _) => OptionValue::Flag(false),
    (ValueKind::Integer, _) => OptionValue::Integer(None),
    (ValueKind::Append | ValueKind::CommaList, _) => OptionValue::List(Vec::new()),
    (_, DefaultValue::Text(text)) => OptionValue::Text(Some(text.to_string())),
    (_, DefaultValue::HostArch) => OptionValue::Text(Some(host.arch.clone())),
    (_, DefaultValue::HostOs) => OptionValue::Text(Some(host.os.clone())),
    (_, DefaultValue::Off | DefaultValue::Unset | DefaultValue::Empty) => OptionValue::Text(None),
  }
}

/// Split a token into its descriptor and inline (`=value`) part.
fn lookup(token: &str) -> Result<(&'static OptionDescriptor, Option<&str>), OptionError> {
  let unknown = || OptionError::Unknown(token.to_string());

  if let Some(long) = token.strip_prefix("--") {
    let (name, inline) = match long.split_once('=') {
      Some((name, value)) => (name, Some(value)),
      None => (long, None),
    };
    return find_long(name).map(|descriptor| (descriptor, inline)).ok_or_else(unknown);
  }

  let mut chars = token.strip_prefix('-').ok_or_else(unknown)?.chars();
  match (chars.next(), chars.next()) {
    (Some(short), None) => find_short(short).map(|descriptor| (descriptor, None)).ok_or_else(unknown),
    _ => Err(unknown()),
  }
}

fn check_choice(descriptor: &OptionDescriptor, value: &str) -> Result<(), OptionError> {
  match descriptor.kind.choices() {
    Some(choices) if !choices.contains(&value) => Err(OptionError::InvalidChoice {
      option: descriptor.name,
      value: value.to_string(),
      choices,
    }),
    _ => Ok(()),
  }
}

/// Split a comma list, dropping empty entries and repeats.
fn comma_list(value: &str) -> Vec<String> {
  let mut items: Vec<String> = Vec::new();
  for item in value.split(',').filter(|item| !item.is_empty()) {
    if !items.iter().any(|existing| existing == item) {
      items.push(item.to_string());
    }
  }
  items
}

/// Consume the merged token sequence.
///
/// Single-value options keep their last occurrence, `Append` options collect
/// every occurrence in order. Aliases write to the same destination, so the
/// later token wins regardless of schema order.
pub fn resolve_values(tokens: &[String], host: &Platform) -> Result<OptionValues, OptionError> {
  let mut values = OptionValues::defaults(host);
  let mut tokens = tokens.iter().peekable();

  while let Some(token) = tokens.next() {
    let (descriptor, inline) = lookup(token)?;

    let value = match (inline, descriptor.kind) {
      (Some(value), _) => Some(value.to_string()),
      (None, kind) if kind.requires_value() => match tokens.next_if(|next| !next.starts_with('-')) {
        Some(next) => Some(next.clone()),
        None => return Err(OptionError::MissingValue { option: descriptor.name }),
      },
      (None, ValueKind::OptionalChoice { choices, .. }) => tokens
        .next_if(|next| choices.contains(&next.as_str()))
        .cloned(),
      (None, _) => None,
    };

    let resolved = match (descriptor.kind, value) {
      (ValueKind::Flag, None) => OptionValue::Flag(true),
      (ValueKind::Flag, Some(value)) => {
        return Err(OptionError::UnexpectedValue {
          option: descriptor.name,
          value,
        });
      }
      (ValueKind::OptionalChoice { implicit, .. }, None) => OptionValue::Text(Some(implicit.to_string())),
      (ValueKind::Integer, Some(value)) => match value.parse::<i64>() {
        Ok(number) => OptionValue::Integer(Some(number)),
        Err(_) => {
          return Err(OptionError::NotAnInteger {
            option: descriptor.name,
            value,
          });
        }
      },
      (ValueKind::Append, Some(value)) => {
        let mut items = values.list(descriptor.dest).to_vec();
        items.push(value);
        OptionValue::List(items)
      }
      (ValueKind::CommaList, Some(value)) => OptionValue::List(comma_list(&value)),
      (_, Some(value)) => {
        check_choice(descriptor, &value)?;
        OptionValue::Text(Some(value))
      }
      (_, None) => return Err(OptionError::MissingValue { option: descriptor.name }),
    };

    values.0.insert(descriptor.dest, resolved);
  }

  Ok(values)
}

/// Resolve the merged token sequence into a typed record.
pub fn resolve(tokens: &[String], host: &Platform) -> Result<ResolvedOptions, OptionError> {
  debug!(?tokens, "resolving build options");
  let values = resolve_values(tokens, host)?;
  Ok(ResolvedOptions::from_values(&values))
}
