//! Driver error taxonomy.
//!
//! Every failure aborts the whole invocation; nothing is retried or
//! downgraded. `Command` carries the captured streams of the failing
//! external process so callers can surface them verbatim.

use std::io;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All the ways a driver invocation can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or incomplete toolchain description. Reported before any
    /// process is launched.
    #[error("invalid toolchain description: {0}")]
    Config(String),

    /// Missing source file, wrong extension, or an invalid option
    /// combination. Reported before any process is launched.
    #[error("{0}")]
    InvalidInput(String),

    /// Binding mode requested but no interface directory was found in any
    /// search tier.
    #[error("cannot find `{0}` interface directory")]
    MissingInterface(String),

    /// An external tool could not be resolved to an executable.
    #[error("cannot find executable `{0}`")]
    MissingTool(String),

    /// An external process exited non-zero. The captured streams have
    /// already been surfaced by the runner; they are carried here so the
    /// caller can propagate the child's exit status.
    #[error("{description} failed: `{command}`")]
    Command {
        description: String,
        command: String,
        stdout: String,
        stderr: String,
        status: Option<i32>,
    },

    /// An I/O operation failed (staging, harvesting, stale-artifact
    /// removal, reading a toolchain file).
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Wrap an io::Error with a human-readable context line.
    pub fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> Error {
        let context = context.into();
        move |source| Error::Io { context, source }
    }

    /// The exit status to propagate for this error.
    ///
    /// Toolchain failures propagate the child's status; everything else is
    /// a plain failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Command {
                status: Some(code), ..
            } => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_propagates_status() {
        let err = Error::Command {
            description: "compilation".to_string(),
            command: "c++ -o prog prog.cpp".to_string(),
            stdout: String::new(),
            stderr: "boom".to_string(),
            status: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_non_command_errors_exit_one() {
        assert_eq!(Error::Config("bad".into()).exit_code(), 1);
        assert_eq!(Error::InvalidInput("bad".into()).exit_code(), 1);
        assert_eq!(Error::MissingInterface("slipway".into()).exit_code(), 1);
    }

    #[test]
    fn test_killed_process_exits_one() {
        let err = Error::Command {
            description: "link".to_string(),
            command: "c++".to_string(),
            stdout: String::new(),
            stderr: String::new(),
            status: None,
        };
        assert_eq!(err.exit_code(), 1);
    }
}
