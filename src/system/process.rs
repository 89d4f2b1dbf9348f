//! Process spawning abstraction
//!
//! Every external program (`git`, `npm`, `yarn`) is launched through
//! [`ProcessRunner`] so orchestration code can be exercised with a scripted
//! runner in tests.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A single external command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// When false, the child's stderr is inherited instead of captured
    pub suppress_output: bool,
}

impl Invocation {
    /// Create an invocation with suppressed output and no working directory
    #[must_use]
    #[inline]
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            suppress_output: true,
        }
    }

    /// Run the command inside `dir`
    #[must_use]
    #[inline]
    pub fn current_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Choose whether the child's diagnostics are hidden
    #[must_use]
    #[inline]
    pub const fn suppress_output(mut self, suppress: bool) -> Self {
        self.suppress_output = suppress;
        self
    }

    /// The program followed by its arguments, space separated
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Build a successful output with the given stdout
    #[must_use]
    #[inline]
    pub fn ok<S: Into<String>>(stdout: S) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Build a failed output with the given exit code and stderr
    #[must_use]
    #[inline]
    pub fn failed<S: Into<String>>(code: i32, stderr: S) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    #[inline]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Stdout with the trailing newline removed
    #[must_use]
    #[inline]
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim_end_matches(['\r', '\n'])
    }
}

/// Capability for running external programs
///
/// # Implementations
/// - `RealProcessRunner`: spawns real processes with `std::process::Command`
/// - `MockProcessRunner`: records invocations and replays scripted responses
pub trait ProcessRunner: Send + Sync {
    /// Run the command to completion
    ///
    /// A non-zero exit is reported through [`ProcessOutput::code`], not as an
    /// `Err`. An `Err` means the process could not be spawned at all; an
    /// [`io::ErrorKind::NotFound`] error means the program is not installed.
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}
