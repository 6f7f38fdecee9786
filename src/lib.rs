//! Slipway - a compiler driver for generated C++ sources
//!
//! This crate turns a single generated C++ source file into a runnable
//! artifact: either a native executable, or a SWIG-generated binding
//! module for a scripting language. The toolchain is described as data
//! (an embedded JSON blob or a file supplied alongside the driver) and is
//! never discovered at run time.

pub mod driver;
pub mod error;
pub mod toolchain;
pub mod util;

/// Test utilities and mocks for slipway unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted command runner that records
/// every external invocation without spawning a process.
#[cfg(test)]
pub mod test_support;

pub use driver::{BindingLang, BuildRequest, Driver};
pub use error::{Error, Result};
pub use toolchain::ToolchainConfig;
