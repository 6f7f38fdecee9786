//! Test utilities and mocks for slipway unit tests.
//!
//! The driver's only side-effect boundary is the `CommandRunner` trait;
//! `RecordingRunner` scripts it. Every call is recorded, which doubles
//! as a process-spawn counter for tests that assert nothing was spawned.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::toolchain::command::CommandLine;
use crate::util::process::{CommandRunner, RunOutput};

/// One recorded external invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub rendered: String,
    pub description: String,
    pub cwd: Option<PathBuf>,
}

/// Scripted outcome for one invocation.
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// Files the fake tool "produces"; relative paths resolve against
    /// the call's working directory.
    pub files: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

impl StepOutcome {
    /// Succeed and create the named files.
    pub fn touching(files: &[&str]) -> Self {
        StepOutcome {
            files: files.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Succeed with the given captured stdout.
    pub fn with_stdout(stdout: &str) -> Self {
        StepOutcome {
            stdout: stdout.to_string(),
            ..Default::default()
        }
    }

    /// Fail with the given status and captured stderr.
    pub fn failing(status: i32, stderr: &str) -> Self {
        StepOutcome {
            status,
            stderr: stderr.to_string(),
            ..Default::default()
        }
    }
}

/// A `CommandRunner` that never spawns a process.
///
/// Outcomes are consumed in push order; once the script is exhausted,
/// every further call succeeds with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<RecordedCall>>,
    script: RefCell<VecDeque<StepOutcome>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        RecordingRunner::default()
    }

    /// Queue the outcome for the next unscripted invocation.
    pub fn push(&self, outcome: StepOutcome) {
        self.script.borrow_mut().push_back(outcome);
    }

    /// Everything that was "run", in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// The process-spawn counter.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cmd: &CommandLine, description: &str, cwd: Option<&Path>) -> Result<RunOutput> {
        self.calls.borrow_mut().push(RecordedCall {
            rendered: cmd.render(),
            description: description.to_string(),
            cwd: cwd.map(Path::to_path_buf),
        });

        let outcome = self.script.borrow_mut().pop_front().unwrap_or_default();

        for file in &outcome.files {
            let path = match cwd {
                Some(dir) => dir.join(file),
                None => PathBuf::from(file),
            };
            fs::write(&path, "").unwrap();
        }

        if outcome.status != 0 {
            return Err(Error::Command {
                description: description.to_string(),
                command: cmd.render(),
                stdout: outcome.stdout,
                stderr: outcome.stderr,
                status: Some(outcome.status),
            });
        }

        Ok(RunOutput {
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            status: Some(0),
        })
    }
}
