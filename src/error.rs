//! Error taxonomy for a single run.
//!
//! Every fault the orchestrator can hit maps onto one of four kinds. Only
//! [`RunError::ToolFailure`] carries its own exit code; everything else
//! exits with [`FAULT_EXIT_CODE`].

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for configuration, I/O and launch faults.
pub const FAULT_EXIT_CODE: i32 = 2;

/// Coarse classification of a [`RunError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Io,
    ToolFailure,
    Launch,
}

/// Which external tool returned a non-zero status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compile,
    Link,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Compile => write!(f, "compiler"),
            Stage::Link => write!(f, "linker"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    /// Missing toolchain variables, unknown architecture, wrong extension,
    /// bad config file.
    #[error("{0}")]
    Configuration(String),

    #[error("Could not {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} exited with status {code}")]
    ToolFailure { stage: Stage, code: i32 },

    #[error("Could not execute \"{command}\": {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Configuration(_) => ErrorKind::Configuration,
            RunError::Io { .. } => ErrorKind::Io,
            RunError::ToolFailure { .. } => ErrorKind::ToolFailure,
            RunError::Launch { .. } => ErrorKind::Launch,
        }
    }

    /// The process exit code this error should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::ToolFailure { code, .. } => *code,
            _ => FAULT_EXIT_CODE,
        }
    }
}

pub type Result<T, E = RunError> = std::result::Result<T, E>;
