//! Command-line synthesis.
//!
//! Renders toolchain-correct argv sequences from the toolchain
//! description plus per-invocation options. One canonical token order is
//! used for both build modes: compiler path, caller extra flags,
//! definitions, compile options, includes, standard flag, feature flags,
//! build-type flags, probe flags, output naming, inputs, link options,
//! rpaths, library directories, library names, extra link flags.
//!
//! No validation happens here: malformed config values flow through as
//! malformed tokens and are caught by the toolchain's own exit status,
//! which is authoritative.

use std::path::PathBuf;

use super::{render_template, split_flags, ToolchainConfig};

/// An ordered argv sequence for one external-process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Create a new command line for the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Render for display and error messages.
    pub fn render(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Input for a link step (or a combined compile+link in native mode).
#[derive(Debug, Clone, Default)]
pub struct LinkInput {
    /// Source or object files, in order.
    pub inputs: Vec<PathBuf>,
    /// Output artifact path.
    pub output: PathBuf,
    /// Produce a shared module instead of an executable.
    pub shared: bool,
    /// Library search directories, in request order.
    pub lib_dirs: Vec<PathBuf>,
    /// Library base names, in request order.
    pub lib_names: Vec<String>,
    /// Trailing linker flags (e.g. scripting-runtime link flags).
    pub extra_ld_flags: Vec<String>,
}

/// Assembles compile and link command lines.
///
/// Deterministic: identical inputs render byte-identical token sequences.
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    config: &'a ToolchainConfig,
    debug: bool,
}

impl<'a> CommandBuilder<'a> {
    /// Create a builder for one build type. `debug` selects the debug
    /// flag set; otherwise the release set is used. The two are mutually
    /// exclusive by construction.
    pub fn new(config: &'a ToolchainConfig, debug: bool) -> Self {
        CommandBuilder { config, debug }
    }

    /// Shared flag block: definitions, compile options, includes,
    /// standard flag, feature flags, build-type flags.
    fn flag_block(&self, mut cmd: CommandLine) -> CommandLine {
        cmd = cmd.args(split_flags(&self.config.definitions));
        cmd = cmd.args(split_flags(&self.config.compile_options));
        cmd = cmd.args(split_flags(&self.config.includes));
        cmd = cmd.args(split_flags(&self.config.std_flag));
        cmd = cmd.args(split_flags(&self.config.cxx_flags));
        if self.debug {
            cmd = cmd.args(split_flags(&self.config.debug_cxx_flags));
        } else {
            cmd = cmd.args(split_flags(&self.config.release_cxx_flags));
        }
        cmd
    }

    /// Render a compile-only invocation.
    ///
    /// `extra_flags` lead (e.g. `-fPIC`, `-c`, an embedded-build define);
    /// `probe_flags` follow the flag block (e.g. scripting-runtime
    /// compile flags or JNI include flags); `inputs` trail.
    pub fn compile_command(
        &self,
        inputs: &[PathBuf],
        extra_flags: &[String],
        probe_flags: &[String],
    ) -> CommandLine {
        let mut cmd = CommandLine::new(&self.config.compiler);
        cmd = cmd.args(extra_flags.iter().cloned());
        cmd = self.flag_block(cmd);
        cmd = cmd.args(probe_flags.iter().cloned());
        for input in inputs {
            cmd = cmd.arg(input.display().to_string());
        }
        cmd
    }

    /// Render a link invocation (native mode passes the source itself,
    /// making this a combined compile+link).
    pub fn link_command(&self, input: &LinkInput) -> CommandLine {
        let mut cmd = CommandLine::new(&self.config.compiler);
        if input.shared {
            cmd = cmd.arg("-shared");
        }
        cmd = self.flag_block(cmd);
        cmd = cmd.args(render_template(
            &self.config.outname_fmt,
            &input.output.display().to_string(),
        ));
        for file in &input.inputs {
            cmd = cmd.arg(file.display().to_string());
        }
        cmd = cmd.args(split_flags(&self.config.link_options));
        for rpath in self.config.rpath_list() {
            cmd = cmd.args(render_template(&self.config.rpath_fmt, &rpath));
        }
        for dir in &input.lib_dirs {
            cmd = cmd.args(render_template(
                &self.config.libdir_fmt,
                &dir.display().to_string(),
            ));
        }
        for name in &input.lib_names {
            cmd = cmd.args(render_template(&self.config.libname_fmt, name));
        }
        cmd = cmd.args(input.extra_ld_flags.iter().cloned());
        cmd
    }
}
