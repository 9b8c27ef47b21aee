//! Declarative table of every recognized build option.
//!
//! The table is the single source of truth for parsing: the resolver walks it
//! to seed defaults and to look up each token, and `iotbuild options` renders
//! it for humans.

use crate::consts::{BUILD_CONFIG_FILE, BUILD_DIR, INSTALL_PREFIX};

pub const BUILD_TYPES: &[&str] = &["debug", "release"];
pub const TARGET_ARCHS: &[&str] = &["aarch64", "arm", "openwrt", "x86", "i686", "x86_64", "x64", "mipsel"];
pub const TARGET_OSES: &[&str] = &["linux", "darwin", "osx", "nuttx", "tizen", "tizenrt"];
pub const TARGET_BOARDS: &[&str] = &["artik10", "stm32f4dis", "rpi2", "artik05x"];
pub const JERRY_PROFILES: &[&str] = &["es5.1", "es2015-subset"];
pub const TEST_LEVELS: &[&str] = &["full", "quiet"];

/// How an option consumes its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
  /// Bare switch, `--name` turns it on.
  Flag,
  /// Free-form string, last occurrence wins.
  Value,
  /// Integer, last occurrence wins.
  Integer,
  /// String restricted to a fixed set, last occurrence wins.
  Choice(&'static [&'static str]),
  /// Like `Choice`, but the bare form selects `implicit`.
  OptionalChoice {
    choices: &'static [&'static str],
    implicit: &'static str,
  },
  /// Every occurrence appends.
  Append,
  /// Single comma-separated value, last occurrence wins.
  CommaList,
}

impl ValueKind {
  /// Whether a bare `--name` must be followed by a value.
  pub fn requires_value(&self) -> bool {
    !matches!(self, ValueKind::Flag | ValueKind::OptionalChoice { .. })
  }

  pub fn choices(&self) -> Option<&'static [&'static str]> {
    match *self {
      ValueKind::Choice(choices) | ValueKind::OptionalChoice { choices, .. } => Some(choices),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ValueKind::Flag => "flag",
      ValueKind::Value => "string",
      ValueKind::Integer => "integer",
      ValueKind::Choice(_) => "choice",
      ValueKind::OptionalChoice { .. } => "optional choice",
      ValueKind::Append => "list (repeatable)",
      ValueKind::CommaList => "list (comma separated)",
    }
  }
}

/// Default applied before any token is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
  Off,
  Unset,
  Empty,
  Text(&'static str),
  HostArch,
  HostOs,
}

impl DefaultValue {
  pub fn describe(&self) -> String {
    match self {
      DefaultValue::Off => "off".to_string(),
      DefaultValue::Unset => "none".to_string(),
      DefaultValue::Empty => "[]".to_string(),
      DefaultValue::Text(text) => (*text).to_string(),
      DefaultValue::HostArch => "host arch".to_string(),
      DefaultValue::HostOs => "host os".to_string(),
    }
  }
}

/// One recognized option.
///
/// Several descriptors may share a `dest`; they are aliases and the token that
/// comes later in the merged sequence wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
  pub name: &'static str,
  pub short: Option<char>,
  pub dest: &'static str,
  pub kind: ValueKind,
  pub default: DefaultValue,
  pub help: &'static str,
}

const fn opt(
  name: &'static str,
  dest: &'static str,
  kind: ValueKind,
  default: DefaultValue,
  help: &'static str,
) -> OptionDescriptor {
  OptionDescriptor {
    name,
    short: None,
    dest,
    kind,
    default,
    help,
  }
}

const fn flag(name: &'static str, dest: &'static str, help: &'static str) -> OptionDescriptor {
  opt(name, dest, ValueKind::Flag, DefaultValue::Off, help)
}

const fn append(name: &'static str, dest: &'static str, help: &'static str) -> OptionDescriptor {
  opt(name, dest, ValueKind::Append, DefaultValue::Empty, help)
}

pub static OPTIONS: &[OptionDescriptor] = &[
  opt(
    "buildtype",
    "buildtype",
    ValueKind::Choice(BUILD_TYPES),
    DefaultValue::Text("debug"),
    "Specify the build type",
  ),
  opt(
    "builddir",
    "builddir",
    ValueKind::Value,
    DefaultValue::Text(BUILD_DIR),
    "Specify the build directory",
  ),
  flag("buildlib", "buildlib", "Build the IoT.js library only"),
  flag("install", "install", "Install IoT.js binary/library/headers"),
  opt(
    "install-prefix",
    "install_prefix",
    ValueKind::Value,
    DefaultValue::Text(INSTALL_PREFIX),
    "Select the install prefix",
  ),
  flag("clean", "clean", "Clean build directory before build"),
  opt(
    "config",
    "config_path",
    ValueKind::Value,
    DefaultValue::Text(BUILD_CONFIG_FILE),
    "Specify the config file",
  ),
  flag("disable-es2015", "disable_es2015", "Disable ES2015 features"),
  opt(
    "profile",
    "profile",
    ValueKind::Value,
    DefaultValue::Unset,
    "Specify the module profile file for IoT.js",
  ),
  opt(
    "target-arch",
    "target_arch",
    ValueKind::Choice(TARGET_ARCHS),
    DefaultValue::HostArch,
    "Specify the target architecture",
  ),
  opt(
    "target-os",
    "target_os",
    ValueKind::Choice(TARGET_OSES),
    DefaultValue::HostOs,
    "Specify the target os",
  ),
  opt(
    "target-board",
    "target_board",
    ValueKind::Choice(TARGET_BOARDS),
    DefaultValue::Unset,
    "Specify the target board (if needed)",
  ),
  opt(
    "nuttx-home",
    "sysroot",
    ValueKind::Value,
    DefaultValue::Unset,
    "Specify the NuttX base directory (alias of --sysroot)",
  ),
  opt(
    "sysroot",
    "sysroot",
    ValueKind::Value,
    DefaultValue::Unset,
    "The development tree root directory, required for NuttX and TizenRT",
  ),
  append("cmake-param", "cmake_param", "Additional cmake parameter"),
  append("compile-flag", "compile_flag", "Additional compile flag"),
  append("link-flag", "link_flag", "Additional linker flag"),
  append(
    "external-include-dir",
    "external_include_dir",
    "Additional external include directory",
  ),
  append("external-lib", "external_lib", "Additional external library"),
  opt(
    "external-modules",
    "external_modules",
    ValueKind::CommaList,
    DefaultValue::Empty,
    "Paths of modules.json files to process (path1,path2,...)",
  ),
  append(
    "jerry-cmake-param",
    "jerry_cmake_param",
    "Additional cmake parameter for JerryScript",
  ),
  append(
    "jerry-compile-flag",
    "jerry_compile_flag",
    "Additional compile flag for JerryScript",
  ),
  flag("jerry-lto", "jerry_lto", "Build JerryScript with LTO enabled"),
  flag("jerryx", "jerryx", "Build with JerryX"),
  opt(
    "jerry-heap-section",
    "jerry_heap_section",
    ValueKind::Value,
    DefaultValue::Unset,
    "Name of the JerryScript heap section",
  ),
  opt(
    "jerry-heaplimit",
    "jerry_heaplimit",
    ValueKind::Integer,
    DefaultValue::Unset,
    "JerryScript max heap size in KB",
  ),
  flag("jerry-memstat", "jerry_memstat", "Enable JerryScript heap statistics"),
  flag("jerry-cpu-profiler", "jerry_cpu_profiler", "Enable JerryScript CPU profiler"),
  flag("jerry-heap-profiler", "jerry_heap_profiler", "Enable JerryScript heap profiler"),
  flag(
    "jerry-function-name",
    "jerry_function_name",
    "Enable saving JavaScript function names",
  ),
  opt(
    "jerry-profile",
    "jerry_profile",
    ValueKind::Choice(JERRY_PROFILES),
    DefaultValue::Text("es5.1"),
    "Specify the profile for JerryScript",
  ),
  flag("jerry-debugger", "jerry_debugger", "Enable JerryScript debugger"),
  flag("napi", "napi", "Build with N-API enabled"),
  opt(
    "run-test",
    "run_test",
    ValueKind::OptionalChoice {
      choices: TEST_LEVELS,
      implicit: "quiet",
    },
    DefaultValue::Unset,
    "Execute tests after build, optionally choosing the testrunner output level",
  ),
  flag("no-init-submodule", "no_init_submodule", "Disable initialization of git submodules"),
  flag(
    "no-check-valgrind",
    "no_check_valgrind",
    "Disable test execution with valgrind after build",
  ),
  flag("no-parallel-build", "no_parallel_build", "Disable parallel build"),
  flag("no-snapshot", "no_snapshot", "Disable snapshot generation"),
  OptionDescriptor {
    short: Some('e'),
    ..flag("experimental", "experimental", "Build experimental features")
  },
  opt(
    "testsets",
    "testsets",
    ValueKind::Value,
    DefaultValue::Unset,
    "Specify an additional testsets file",
  ),
];

/// Look up an option by its long name (without the leading `--`).
pub fn find_long(name: &str) -> Option<&'static OptionDescriptor> {
  OPTIONS.iter().find(|descriptor| descriptor.name == name)
}

/// Look up an option by its single-letter alias.
pub fn find_short(short: char) -> Option<&'static OptionDescriptor> {
  OPTIONS.iter().find(|descriptor| descriptor.short == Some(short))
}
