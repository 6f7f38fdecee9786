//! Build orchestration.
//!
//! The driver is a single stateless transaction: validate the request,
//! select a build mode, render the command lines, run them, finalize
//! artifacts. Each invocation is strictly sequential; no step starts
//! before the previous one's exit status is known.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::toolchain::ToolchainConfig;
use crate::util::fs::absolutize;
use crate::util::process::CommandRunner;

pub mod binding;
pub mod interface;
pub mod native;
pub mod stage;

/// Required extension for input source files.
pub const SOURCE_EXTENSION: &str = "cpp";

/// Scripting languages a binding module can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingLang {
    Python,
    Java,
}

impl BindingLang {
    /// The language name as the interface generator expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingLang::Python => "python",
            BindingLang::Java => "java",
        }
    }
}

impl fmt::Display for BindingLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindingLang {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(BindingLang::Python),
            "java" => Ok(BindingLang::Java),
            _ => Err(format!(
                "invalid binding language '{}'; expected 'python' or 'java'",
                s
            )),
        }
    }
}

/// Validated user intent for one build.
///
/// Construction is the validation boundary: the source must exist and
/// carry the required extension, and every path is absolutized. Nothing
/// is spawned before a request exists.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Absolute path to the single source file.
    pub source: PathBuf,
    /// Debug build type (release otherwise).
    pub debug: bool,
    /// Binding target; absent means a native executable.
    pub binding: Option<BindingLang>,
    /// Library search directories, absolutized, in request order.
    pub lib_dirs: Vec<PathBuf>,
    /// Library base names, in request order.
    pub lib_names: Vec<String>,
    /// Echo rendered command lines before execution.
    pub verbose: bool,
}

impl BuildRequest {
    /// Validate raw user intent into a request.
    pub fn new(
        source: &Path,
        debug: bool,
        binding: Option<BindingLang>,
        lib_dirs: &[PathBuf],
        lib_names: &[String],
        verbose: bool,
    ) -> Result<Self> {
        let source = absolutize(source)?;

        if !source.is_file() {
            return Err(Error::InvalidInput(format!(
                "cannot open source file: '{}'",
                source.display()
            )));
        }
        if source.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            return Err(Error::InvalidInput(format!(
                "source file is not a .{} file: '{}'",
                SOURCE_EXTENSION,
                source.display()
            )));
        }

        let lib_dirs = lib_dirs
            .iter()
            .map(|d| absolutize(d))
            .collect::<Result<Vec<_>>>()?;

        Ok(BuildRequest {
            source,
            debug,
            binding,
            lib_dirs,
            lib_names: lib_names.to_vec(),
            verbose,
        })
    }

    /// File stem of the source, used to name produced artifacts.
    pub fn stem(&self) -> &str {
        self.source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Directory containing the source file.
    pub fn source_dir(&self) -> &Path {
        self.source.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// The orchestration entry point.
///
/// Holds the parsed toolchain description and the command runner
/// explicitly; there is no module-level configuration, so multiple
/// configurations can coexist in one process.
pub struct Driver<'a> {
    config: &'a ToolchainConfig,
    runner: &'a dyn CommandRunner,
    /// Directory containing the driver executable; base of the
    /// interface-directory search.
    driver_root: PathBuf,
    /// The caller's working directory; binding artifacts land here.
    workdir: PathBuf,
}

impl<'a> Driver<'a> {
    pub fn new(
        config: &'a ToolchainConfig,
        runner: &'a dyn CommandRunner,
        driver_root: impl Into<PathBuf>,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Driver {
            config,
            runner,
            driver_root: driver_root.into(),
            workdir: workdir.into(),
        }
    }

    /// Run the requested build to completion.
    ///
    /// Selects the build mode once; there are no transitions back. On
    /// success the final artifact is in place; on failure nothing
    /// observable has changed in the caller's working directory (native
    /// mode excepted: its stale-artifact removal is documented behavior).
    pub fn run(&self, request: &BuildRequest) -> Result<()> {
        match request.binding {
            None => native::build(self.config, self.runner, request),
            Some(lang) => binding::build(
                self.config,
                self.runner,
                request,
                lang,
                &self.driver_root,
                &self.workdir,
            ),
        }
    }
}
