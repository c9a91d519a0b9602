use crate::error::RunError;
use std::ffi::OsString;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// How a launched process is wired to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Inherit stdin, stdout and stderr; output is relayed live.
    Streamed,
    /// Null stdin; stdout and stderr are collected and handed back to the caller.
    Captured,
}

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub mode: OutputMode,
}

impl Invocation {
    pub fn new<P, I, A>(program: P, args: I, mode: OutputMode) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn streamed<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self::new(program, args, OutputMode::Streamed)
    }

    pub fn captured<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self::new(program, args, OutputMode::Captured)
    }

    /// Program name for messages and logs.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Result of a finished process.
///
/// `stdout` and `stderr` are only populated for [`OutputMode::Captured`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: ExitCode,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Spawns external programs on behalf of the dispatcher.
///
/// Implementations must resolve `program` before spawning and return
/// [`RunError::CommandNotFound`] without side effects when it can't be found.
/// A non-zero exit is not an error at this level; it's reported through
/// [`ProcessOutput::status`].
pub trait Launcher {
    fn launch(&mut self, invocation: &Invocation) -> Result<ProcessOutput, RunError>;
}
