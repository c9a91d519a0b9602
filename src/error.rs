use crate::command::ExitCode;
use crate::language::Language;
use thiserror::Error;

/// Everything that can stop a run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {code}")]
    Exited { program: String, code: ExitCode },

    #[error("Unknown language")]
    UnknownLanguage,

    #[error("this language is not yet supported or invalid file format")]
    Unsupported(Language),

    #[error("no source file given")]
    MissingSource,

    #[error("failed to relay output: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Process exit status to report for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RunError::Exited { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}
