use iotbuild_lib::options::schema::{OPTIONS, ValueKind};

/// Print every recognized build option.
pub fn cmd_options() {
  println!("Build options (also accepted as keys in build.config):");
  println!();

  for descriptor in OPTIONS {
    let mut usage = match descriptor.short {
      Some(short) => format!("-{}, --{}", short, descriptor.name),
      None => format!("--{}", descriptor.name),
    };
    match descriptor.kind {
      ValueKind::Flag => {}
      ValueKind::OptionalChoice { .. } => usage.push_str("[=<level>]"),
      _ => usage.push_str("=<value>"),
    }

    println!("  {}", usage);
    println!("      {} [{}]", descriptor.help, descriptor.kind.as_str());
    if let Some(choices) = descriptor.kind.choices() {
      println!("      choices: {}", choices.join(", "));
    }
    println!("      default: {}", descriptor.default.describe());
  }
}
