//! Subprocess execution utilities.
//!
//! All external tools (compiler, interface generator, runtime probe) go
//! through the `CommandRunner` trait, so tests can count and script
//! invocations without spawning anything. `SystemRunner` is the single
//! point where a non-zero exit status becomes a domain error; failed
//! invocations are never retried.
//!
//! There is no timeout or cancellation: a hung compiler, generator, or
//! probe blocks the driver indefinitely.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::toolchain::command::CommandLine;

/// Captured result of one external invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: Option<i32>,
}

/// Executes assembled command lines.
pub trait CommandRunner {
    /// Run `cmd` to completion, capturing both streams.
    ///
    /// `description` names the step for error reporting. When `cwd` is
    /// set, the child runs with that working directory; the driver
    /// process itself never changes directory. A non-zero exit status
    /// yields `Error::Command` after the captured streams have been
    /// surfaced verbatim.
    fn run(&self, cmd: &CommandLine, description: &str, cwd: Option<&Path>) -> Result<RunOutput>;
}

/// Real subprocess runner.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    verbose: bool,
}

impl SystemRunner {
    /// Create a runner. When `verbose`, every rendered command line is
    /// echoed to stderr before execution.
    pub fn new(verbose: bool) -> Self {
        SystemRunner { verbose }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &CommandLine, description: &str, cwd: Option<&Path>) -> Result<RunOutput> {
        // Resolve before spawning, so a missing tool is reported cleanly
        // instead of as a raw OS error.
        let program = resolve_program(&cmd.program)?;

        if self.verbose {
            eprintln!("{}", cmd.render());
        }
        tracing::debug!("{}: {}", description, cmd.render());

        let mut command = Command::new(program);
        command
            .args(&cmd.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = command.output().map_err(Error::io(format!(
            "failed to spawn `{}`",
            cmd.program.display()
        )))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            // Captured streams are surfaced verbatim, never swallowed.
            print!("{}", stdout);
            eprint!("{}", stderr);
            return Err(Error::Command {
                description: description.to_string(),
                command: cmd.render(),
                stdout,
                stderr,
                status: output.status.code(),
            });
        }

        Ok(RunOutput {
            stdout,
            stderr,
            status: output.status.code(),
        })
    }
}

/// Resolve a program name or path to an executable.
fn resolve_program(program: &Path) -> Result<PathBuf> {
    which::which(program).map_err(|_| Error::MissingTool(program.display().to_string()))
}
