//! External tool invocation.
//!
//! Commands are assembled as argument vectors, never as shell strings, and
//! run through the [`ToolRunner`] trait so tests can substitute a scripted
//! runner for the real subprocess layer.

pub mod detection;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One external command, assembled as an argument vector.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolCommand {
    /// Program to run.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Environment overrides applied on top of the inherited environment.
    pub envs: Vec<(String, String)>,
    /// Working directory, when it differs from the caller's.
    pub current_dir: Option<PathBuf>,
}

impl ToolCommand {
    /// Creates a command for the given program.
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends one argument.
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds environment overrides.
    pub fn envs<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.envs.extend(vars);
        self
    }

    /// Sets the working directory.
    pub fn current_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The command as one printable line, for logs and error messages.
    pub fn display_line(&self) -> String {
        if self.args.is_empty() {
            return self.program.clone();
        }
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// Captured result of a finished tool run.
#[derive(Clone, Debug)]
pub struct ToolOutput {
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout.
    pub stdout: Vec<u8>,
    /// Captured stderr.
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Whether the tool exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stderr as text, lossily decoded.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs external commands to completion.
///
/// The production implementation is [`ProcessRunner`]; tests substitute a
/// scripted runner that records the commands instead of spawning them.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    /// Runs the command to completion, capturing its output.
    ///
    /// A non-zero exit is not an error at this layer; callers decide with
    /// [`expect_success`].
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput>;
}

/// Runs commands as real subprocesses.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new process runner.
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        log::debug!("running {}", command.display_line());

        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args);
        for (key, value) in &command.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|source| Error::ToolSpawn {
            program: command.program.clone(),
            source,
        })?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Converts a non-zero exit into [`Error::ToolFailed`] carrying the stderr.
pub fn expect_success(command: &ToolCommand, output: &ToolOutput) -> Result<()> {
    if output.success() {
        return Ok(());
    }
    Err(Error::ToolFailed {
        command: command.display_line(),
        code: output.code,
        stderr: output.stderr_lossy().trim().to_string(),
    })
}
