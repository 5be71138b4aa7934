//! External command execution
//!
//! This module provides:
//! - A description of an external command (program, arguments, working directory)
//! - A runner trait so the bootstrapper can be driven without spawning processes
//! - The system runner and a dry-run runner that only prints

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// An external command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved through PATH
    pub program: String,
    /// Arguments, kept as OS strings so paths pass through unchanged
    pub args: Vec<OsString>,
    /// Working directory
    pub cwd: PathBuf,
}

impl Invocation {
    /// Create a new invocation without arguments
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// Append one argument (builder pattern)
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments (builder pattern)
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }

    /// Returns true if the first argument is `sub`
    pub fn is_subcommand(&self, program: &str, sub: &str) -> bool {
        self.program == program && self.args.first().is_some_and(|first| first == sub)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of running an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Error message if the process could not be started
    pub error: Option<String>,
}

impl RunOutcome {
    /// Create a successful outcome
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
            error: None,
        }
    }

    /// Create an outcome from an exit code
    pub fn exited(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
            error: None,
        }
    }

    /// Create an outcome for a process that could not be spawned
    pub fn spawn_failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: None,
            error: Some(message.into()),
        }
    }
}

/// Trait for running external commands
pub trait CommandRunner {
    /// Run the invocation to completion
    fn run(&self, invocation: &Invocation) -> RunOutcome;
}

/// Runner that spawns real processes and waits for them
#[derive(Debug, Default)]
pub struct SystemRunner {
    /// Discard the child's stdout/stderr instead of inheriting them
    quiet: bool,
}

impl SystemRunner {
    /// Create a runner whose children share this process' terminal
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Create a runner that discards child output
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> RunOutcome {
        tracing::debug!(
            command = %invocation,
            cwd = %invocation.cwd.display(),
            "running"
        );

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).current_dir(&invocation.cwd);
        if self.quiet {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        match command.status() {
            Ok(status) => match status.code() {
                Some(code) => RunOutcome::exited(code),
                // Terminated by a signal
                None => RunOutcome {
                    success: false,
                    code: None,
                    error: Some(format!("terminated: {}", status)),
                },
            },
            Err(e) => RunOutcome::spawn_failed(format!(
                "failed to execute {}: {}",
                invocation.program, e
            )),
        }
    }
}

/// Runner that prints each invocation instead of running it
#[derive(Debug)]
pub struct DryRunRunner {
    /// Print invocations to stdout
    echo: bool,
}

impl DryRunRunner {
    /// Create a dry-run runner that prints every invocation
    pub fn new() -> Self {
        Self { echo: true }
    }

    /// Create a dry-run runner that prints nothing
    pub fn silent() -> Self {
        Self { echo: false }
    }
}

impl Default for DryRunRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> RunOutcome {
        tracing::debug!(command = %invocation, "dry run, not executing");
        if self.echo {
            println!("    $ {}", invocation);
        }
        RunOutcome::success()
    }
}
