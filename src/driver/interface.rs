//! Interface-directory discovery.
//!
//! The binding build needs the interface inputs that ship with the
//! driver installation. They are searched in three ordered tiers:
//! alongside the driver executable, one level up from it, and under the
//! configured fallback include root. The tiers are an explicit candidate
//! list, so adding a fourth is a data change.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::toolchain::ToolchainConfig;

/// Name of the include namespace the driver ships under.
pub const INTERFACE_NAMESPACE: &str = "slipway";

/// Subdirectory holding the interface-generator inputs.
pub const SWIG_SUBDIR: &str = "swig";

/// Ordered candidate interface directories.
pub fn candidate_dirs(driver_root: &Path, config: &ToolchainConfig) -> Vec<PathBuf> {
    let mut tiers = vec![
        driver_root.join("include"),
        driver_root.join("..").join("include"),
    ];
    if !config.source_include_dir.is_empty() {
        tiers.push(PathBuf::from(&config.source_include_dir));
    }
    tiers
        .into_iter()
        .map(|t| t.join(INTERFACE_NAMESPACE))
        .collect()
}

/// The first existing interface directory, if any.
pub fn find_interface_dir(driver_root: &Path, config: &ToolchainConfig) -> Option<PathBuf> {
    candidate_dirs(driver_root, config)
        .into_iter()
        .find(|dir| dir.exists())
}

/// The generator-input directory inside the discovered interface
/// directory. Fails with `MissingInterface` when no tier resolves or the
/// resolved tier has no generator inputs.
pub fn find_swig_dir(driver_root: &Path, config: &ToolchainConfig) -> Result<PathBuf> {
    find_interface_dir(driver_root, config)
        .map(|dir| dir.join(SWIG_SUBDIR))
        .filter(|dir| dir.exists())
        .ok_or_else(|| {
            Error::MissingInterface(format!("{}/{}", INTERFACE_NAMESPACE, SWIG_SUBDIR))
        })
}
