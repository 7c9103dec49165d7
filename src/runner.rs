//! # External Command Execution
//!
//! The mirror and guard steps never spawn processes directly. They go
//! through the [`CommandRunner`] trait, which runs a program to completion
//! and hands back its exit status and captured output.
//!
//! [`SystemRunner`] is the real implementation built on
//! `std::process::Command`. Tests substitute a recording fake that returns
//! scripted results, so the sync protocol can be exercised without a `git`
//! binary or network access.
//!
//! Every call blocks until the child exits. There is no timeout: a hung
//! child blocks the caller.

use std::io;
use std::path::Path;
use std::process::Command;

/// Captured result of a finished child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A zero exit with the given stdout.
    pub fn success(stdout: &str) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// A non-zero exit with the given stderr.
    pub fn failure(code: i32, stderr: &str) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Trait for running external programs - allows faking in tests
pub trait CommandRunner {
    /// Run `program` with `args`, optionally inside `cwd`, and wait for it.
    ///
    /// A non-zero exit is reported through [`CommandOutput::status`], not as
    /// an error. `Err` means the process could not be started.
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> io::Result<CommandOutput>;
}

/// Runs commands on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> io::Result<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        log::trace!("running {} {}", program, args.join(" "));
        let output = command.output()?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
