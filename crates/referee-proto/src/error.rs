//! Error types shared by every Referee crate.

use crate::Role;
use std::num::ParseIntError;
use std::string::FromUtf8Error;
use std::time::Duration;

/// Result alias using the shared [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions that end a game.
///
/// None of these are retried: the driver stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to start {role} process `{command}`: {source}")]
    Spawn {
        role: Role,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error talking to {role} process: {source}")]
    Io {
        role: Role,
        #[source]
        source: std::io::Error,
    },

    #[error("{role} process wrote output that is not valid UTF-8")]
    InvalidUtf8 {
        role: Role,
        #[source]
        source: FromUtf8Error,
    },

    #[error("{role} process did not finish within {timeout:?}")]
    Timeout { role: Role, timeout: Duration },

    #[error("{role} process exited with status {}", describe_exit(.code))]
    NonZeroExit { role: Role, code: Option<i32> },

    #[error("Judge reported a winner that is not an integer: {raw:?}")]
    InvalidWinner {
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to write turn report: {0}")]
    Report(#[source] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

impl Error {
    /// Returns the collaborator responsible for the failure, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Error::Spawn { role, .. }
            | Error::Io { role, .. }
            | Error::InvalidUtf8 { role, .. }
            | Error::Timeout { role, .. }
            | Error::NonZeroExit { role, .. } => Some(*role),
            Error::InvalidWinner { .. } => Some(Role::Judge),
            Error::Report(_) => None,
        }
    }
}
