//! Toolchain description.
//!
//! The active compiler/linker is described as data: a flat JSON document
//! with a fixed, versioned field set. A default blob is compiled into the
//! driver; `--toolchain FILE` substitutes another one. Nothing about the
//! toolchain is discovered at run time.
//!
//! Multi-flag fields (`definitions`, `link_options`, ...) hold
//! whitespace-separated argv tokens. The four `*_fmt` fields are
//! formatting templates with exactly one `{}` placeholder each; rendered
//! templates are whitespace-split too, so `"-o {}"` yields two tokens.

use serde::Deserialize;

use crate::error::{Error, Result};

pub mod command;

/// Toolchain description compiled into the driver.
pub const EMBEDDED_TOOLCHAIN_JSON: &str = include_str!("default.json");

/// Parsed, immutable description of the active compiler/linker.
///
/// Constructed once per invocation and passed by reference into the
/// orchestration entry point; there is no process-wide configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainConfig {
    /// Path to the C++ compiler driver.
    pub compiler: std::path::PathBuf,

    /// Preprocessor definitions for the generated source.
    #[serde(default)]
    pub definitions: String,

    /// Extra compile options.
    #[serde(default)]
    pub compile_options: String,

    /// Include-path flags.
    pub includes: String,

    /// Language-standard flag.
    pub std_flag: String,

    /// Feature flags applied to every build.
    #[serde(default)]
    pub cxx_flags: String,

    /// Flags for release builds.
    pub release_cxx_flags: String,

    /// Flags for debug builds.
    pub debug_cxx_flags: String,

    /// Extra link options.
    #[serde(default)]
    pub link_options: String,

    /// Runtime search paths, `path_delimiter`-separated.
    #[serde(default)]
    pub rpaths: String,

    /// Output-naming template, e.g. `-o {}`.
    pub outname_fmt: String,

    /// Library-search-directory template, e.g. `-L{}`.
    pub libdir_fmt: String,

    /// Library-name template, e.g. `-l{}`.
    pub libname_fmt: String,

    /// Runtime-search-path template, e.g. `-Wl,-rpath,{}`.
    pub rpath_fmt: String,

    /// Separator for the list-valued fields.
    pub path_delimiter: String,

    /// Extension of produced executables (empty on Unix).
    #[serde(default)]
    pub exe_extension: String,

    /// Fallback root for the interface-directory search.
    #[serde(default)]
    pub source_include_dir: String,

    /// JNI include directories for the Java binding,
    /// `path_delimiter`-separated.
    #[serde(default)]
    pub jni_includes: String,
}

impl ToolchainConfig {
    /// Parse a toolchain description.
    ///
    /// Fails with `Error::Config` when the text is not well-formed JSON, a
    /// required field is absent, or a formatting template does not carry
    /// exactly one placeholder. Unknown extra fields are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let config: ToolchainConfig =
            serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the blob compiled into the driver.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_TOOLCHAIN_JSON)
    }

    fn validate(&self) -> Result<()> {
        for (name, fmt) in [
            ("outname_fmt", &self.outname_fmt),
            ("libdir_fmt", &self.libdir_fmt),
            ("libname_fmt", &self.libname_fmt),
            ("rpath_fmt", &self.rpath_fmt),
        ] {
            if fmt.matches("{}").count() != 1 {
                return Err(Error::Config(format!(
                    "`{}` must contain exactly one `{{}}` placeholder, got `{}`",
                    name, fmt
                )));
            }
        }
        Ok(())
    }

    /// The configured runtime search paths, in order.
    pub fn rpath_list(&self) -> Vec<String> {
        self.split_list(&self.rpaths)
    }

    /// The configured JNI include directories, in order.
    pub fn jni_include_list(&self) -> Vec<String> {
        self.split_list(&self.jni_includes)
    }

    fn split_list(&self, value: &str) -> Vec<String> {
        value
            .split(self.path_delimiter.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Split a multi-flag config string into argv tokens.
pub(crate) fn split_flags(value: &str) -> impl Iterator<Item = String> + '_ {
    value.split_whitespace().map(str::to_string)
}

/// Render a one-placeholder template and split the result into argv
/// tokens.
pub(crate) fn render_template(fmt: &str, value: &str) -> Vec<String> {
    split_flags(&fmt.replace("{}", value)).collect()
}
