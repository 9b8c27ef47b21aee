//! iotbuild-lib: option resolution and build orchestration for IoT.js
//!
//! The crate turns a persisted build configuration plus command-line tokens
//! into a single cmake/make invocation and an optional test run:
//! - `config`: JSON configuration to command-line tokens
//! - `options`: declarative option schema and token resolution
//! - `adjust`: platform normalization and derived paths
//! - `cmake`: deterministic cmake argument synthesis
//! - `execute`: external process sequencing and the test gate

pub mod adjust;
pub mod cmake;
pub mod config;
pub mod consts;
pub mod error;
pub mod execute;
pub mod options;
pub mod pipeline;
pub mod platform;
pub mod util;

pub use error::{Error, Result};
