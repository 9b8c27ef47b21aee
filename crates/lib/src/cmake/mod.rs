//! Translation of adjusted options into the cmake invocation.
//!
//! Output is a pure function of the [`AdjustedOptions`] record: equal records
//! always produce identical argument vectors. Arguments are passed to the
//! process directly, so values are never shell-quoted.

use std::fmt::Display;
use std::path::Path;

use crate::adjust::AdjustedOptions;

/// Encoding cmake expects for boolean switches.
pub fn on_off(value: bool) -> &'static str {
  if value { "ON" } else { "OFF" }
}

fn define(name: &str, value: impl Display) -> String {
  format!("-D{}={}", name, value)
}

/// Full cmake argument list for the runtime build.
///
/// Unconditional definitions come first in a fixed order, then the optional
/// ones, then the flags shared with the JerryScript sub-build.
pub fn cmake_args(adjusted: &AdjustedOptions) -> Vec<String> {
  let options = &adjusted.options;

  let mut args = vec![
    format!("-B{}", adjusted.build_root.display()),
    format!("-H{}", adjusted.project_root.display()),
    define("CMAKE_TOOLCHAIN_FILE", adjusted.toolchain_file.display()),
    define("CMAKE_BUILD_TYPE", options.buildtype.cmake_name()),
    define("TARGET_ARCH", &options.target_arch),
    define("TARGET_OS", &options.target_os),
    define("TARGET_BOARD", options.target_board.as_deref().unwrap_or("None")),
    define("PLATFORM_DESCRIPTOR", adjusted.target_tuple.triple()),
    define("ENABLE_LTO", on_off(options.jerry_lto)),
    define("ENABLE_SNAPSHOT", on_off(!options.no_snapshot)),
    define("BUILD_LIB_ONLY", on_off(options.buildlib)),
    define("INSTALL_PREFIX", &options.install_prefix),
    define("FEATURE_MEM_STATS", on_off(options.jerry_memstat)),
    define("FEATURE_CPU_PROFILER", on_off(options.jerry_cpu_profiler)),
    define("FEATURE_HEAP_PROFILER", on_off(options.jerry_heap_profiler)),
    define("FEATURE_FUNCTION_NAME", on_off(options.jerry_function_name)),
    define("EXTERNAL_MODULES", options.external_modules.join(";")),
    define("FEATURE_PROFILE", adjusted.jerry_profile_path.display()),
  ];

  if adjusted.is_embedded_rtos() {
    if let Some(sysroot) = options.sysroot.as_deref() {
      args.push(define("EXTERNAL_LIBC_INTERFACE", Path::new(sysroot).join("include").display()));
      args.push(define("TARGET_SYSTEMROOT", sysroot));
    }
    args.push(define("EXTERNAL_CMAKE_SYSTEM_PROCESSOR", "arm"));
  }

  if let Some(limit) = options.jerry_heaplimit.filter(|limit| *limit != 0) {
    args.push(define("MEM_HEAP_SIZE_KB", limit));
  }

  if let Some(section) = options.jerry_heap_section.as_deref() {
    args.push(define("JERRY_HEAP_SECTION_ATTR", section));
  }

  if options.jerry_debugger {
    args.push(define("FEATURE_DEBUGGER", "ON"));
  }

  if options.napi {
    args.push(define("ENABLE_NAPI", "ON"));
  }

  if options.jerryx {
    args.push(define("ENABLE_JERRYX", "ON"));
  }

  args.extend(options.cmake_param.iter().cloned());

  args.push(define("EXTERNAL_LIBS", options.external_lib.join(" ")));

  if !options.jerry_cmake_param.is_empty() {
    args.push(define("EXTRA_JERRY_CMAKE_PARAMS", options.jerry_cmake_param.join(" ")));
  }

  if let Some(profile) = options.profile.as_deref() {
    args.push(define("IOTJS_PROFILE", profile));
  }

  if options.disable_es2015 {
    args.push(define("DISABLE_ES2015", "ON"));
  }

  args.extend(external_build_args(adjusted));
  args
}

/// Compile, link and include settings shared with the JerryScript sub-build.
pub fn external_build_args(adjusted: &AdjustedOptions) -> Vec<String> {
  let options = &adjusted.options;

  let mut compile_flags = options.compile_flag.clone();
  if options.experimental {
    compile_flags.push("-DEXPERIMENTAL".to_string());
  }
  compile_flags.extend(options.jerry_compile_flag.iter().cloned());

  let mut link_flags = options.link_flag.clone();
  if options.jerry_lto {
    link_flags.push("-flto".to_string());
  }

  vec![
    define("EXTERNAL_COMPILE_FLAGS", compile_flags.join(" ")),
    define("EXTERNAL_LINKER_FLAGS", link_flags.join(" ")),
    define("EXTERNAL_INCLUDE_DIR", include_dirs(adjusted).join(" ")),
  ]
}

fn include_dirs(adjusted: &AdjustedOptions) -> Vec<String> {
  let options = &adjusted.options;
  let mut dirs = Vec::new();

  if let Some(sysroot) = options.sysroot.as_deref().filter(|_| adjusted.is_embedded_rtos()) {
    dirs.push(format!("{}/include", sysroot));
    if options.target_board.as_deref() == Some("stm32f4dis") {
      dirs.push(format!("{}/arch/arm/src/stm32", sysroot));
    }
    if options.target_os == "tizenrt" {
      dirs.push(format!("{}/../framework/include/iotbus", sysroot));
    }
  }

  dirs.extend(options.external_include_dir.iter().cloned());
  dirs
}
