//! Fixed names and locations shared across the build front end.
//!
//! All relative paths are resolved against the project root.

pub const APP_NAME: &str = "iotbuild";

/// Default persisted configuration, relative to the project root.
pub const BUILD_CONFIG_FILE: &str = "build.config";

/// Default build directory, relative to the project root.
pub const BUILD_DIR: &str = "build";

pub const INSTALL_PREFIX: &str = "/usr/local";

/// Directory holding one toolchain file per target tuple.
pub const CMAKE_CONFIG_DIR: &str = "cmake/config";

/// Directory holding the JerryScript feature profiles.
pub const JERRY_PROFILE_DIR: &str = "deps/jerry/jerry-core/profiles";

pub const TOOLS_DIR: &str = "tools";
pub const TEST_RUNNER: &str = "testrunner.py";

pub const NODE_GYP: &str = "node_modules/.bin/node-gyp";
pub const NAPI_TEST_MODULE_DIR: &str = "test/napi";
pub const NAPI_ADDONS_DIR: &str = "test/addons-napi";
pub const ADDON_DESCRIPTOR: &str = "binding.gyp";

/// Testsets file used when N-API is enabled without an explicit one.
pub const NAPI_TESTSETS: &str = "test/napi-testsets.json";

/// Config keys whose list values collapse into a single comma-joined token.
pub const COMMA_JOINED_KEYS: &[&str] = &["external-modules"];

/// Environment variable that marks a continuous-integration run.
pub const CI_ENV_VAR: &str = "TRAVIS";
