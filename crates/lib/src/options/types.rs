use std::fmt;

use serde::Serialize;

use super::resolve::OptionValues;

/// Native build configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
  #[default]
  Debug,
  Release,
}

impl BuildType {
  pub fn as_str(&self) -> &'static str {
    match self {
      BuildType::Debug => "debug",
      BuildType::Release => "release",
    }
  }

  /// Spelling expected by `CMAKE_BUILD_TYPE`.
  pub fn cmake_name(&self) -> &'static str {
    match self {
      BuildType::Debug => "Debug",
      BuildType::Release => "Release",
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Output level requested from the test runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestLevel {
  Full,
  Quiet,
}

/// Every build option with its final value.
///
/// Field names match the schema destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
  pub buildtype: BuildType,
  pub builddir: String,
  pub buildlib: bool,
  pub install: bool,
  pub install_prefix: String,
  pub clean: bool,
  pub config_path: String,
  pub disable_es2015: bool,
  pub profile: Option<String>,
  pub target_arch: String,
  pub target_os: String,
  pub target_board: Option<String>,
  pub sysroot: Option<String>,
  pub cmake_param: Vec<String>,
  pub compile_flag: Vec<String>,
  pub link_flag: Vec<String>,
  pub external_include_dir: Vec<String>,
  pub external_lib: Vec<String>,
  pub external_modules: Vec<String>,
  pub jerry_cmake_param: Vec<String>,
  pub jerry_compile_flag: Vec<String>,
  pub jerry_lto: bool,
  pub jerryx: bool,
  pub jerry_heap_section: Option<String>,
  pub jerry_heaplimit: Option<i64>,
  pub jerry_memstat: bool,
  pub jerry_cpu_profiler: bool,
  pub jerry_heap_profiler: bool,
  pub jerry_function_name: bool,
  pub jerry_profile: String,
  pub jerry_debugger: bool,
  pub napi: bool,
  pub run_test: Option<TestLevel>,
  pub no_init_submodule: bool,
  pub no_check_valgrind: bool,
  pub no_parallel_build: bool,
  pub no_snapshot: bool,
  pub experimental: bool,
  pub testsets: Option<String>,
}

impl ResolvedOptions {
  /// Build the typed record from schema-validated values.
  pub fn from_values(values: &OptionValues) -> Self {
    let text = |dest: &str| values.text(dest).map(str::to_string);
    let text_or_default = |dest: &str| values.text(dest).unwrap_or_default().to_string();
    let list = |dest: &str| values.list(dest).to_vec();

    Self {
      buildtype: match values.text("buildtype") {
        Some("release") => BuildType::Release,
        _ => BuildType::Debug,
      },
      builddir: text_or_default("builddir"),
      buildlib: values.flag("buildlib"),
      install: values.flag("install"),
      install_prefix: text_or_default("install_prefix"),
      clean: values.flag("clean"),
      config_path: text_or_default("config_path"),
      disable_es2015: values.flag("disable_es2015"),
      profile: text("profile"),
      target_arch: text_or_default("target_arch"),
      target_os: text_or_default("target_os"),
      target_board: text("target_board"),
      sysroot: text("sysroot"),
      cmake_param: list("cmake_param"),
      compile_flag: list("compile_flag"),
      link_flag: list("link_flag"),
      external_include_dir: list("external_include_dir"),
      external_lib: list("external_lib"),
      external_modules: list("external_modules"),
      jerry_cmake_param: list("jerry_cmake_param"),
      jerry_compile_flag: list("jerry_compile_flag"),
      jerry_lto: values.flag("jerry_lto"),
      jerryx: values.flag("jerryx"),
      jerry_heap_section: text("jerry_heap_section"),
      jerry_heaplimit: values.integer("jerry_heaplimit"),
      jerry_memstat: values.flag("jerry_memstat"),
      jerry_cpu_profiler: values.flag("jerry_cpu_profiler"),
      jerry_heap_profiler: values.flag("jerry_heap_profiler"),
      jerry_function_name: values.flag("jerry_function_name"),
      jerry_profile: text_or_default("jerry_profile"),
      jerry_debugger: values.flag("jerry_debugger"),
      napi: values.flag("napi"),
      run_test: match values.text("run_test") {
        Some("full") => Some(TestLevel::Full),
        Some(_) => Some(TestLevel::Quiet),
        None => None,
      },
      no_init_submodule: values.flag("no_init_submodule"),
      no_check_valgrind: values.flag("no_check_valgrind"),
      no_parallel_build: values.flag("no_parallel_build"),
      no_snapshot: values.flag("no_snapshot"),
      experimental: values.flag("experimental"),
      testsets: text("testsets"),
    }
  }
}
