use std::fmt;
use std::io;
use thiserror::Error;

/// Exit status for failures that have no more specific code
pub const EXIT_ERROR: i32 = 1;
/// Exit status when the store cannot be reached
pub const EXIT_BAD_CONNECTION: i32 = 2;
/// Exit status for malformed or truncated transaction input
pub const EXIT_INVALID_INPUT: i32 = 3;
/// Exit status when the command line itself is wrong
pub const EXIT_BAD_ARGS: i32 = 128;

/// Which of the two line grammars rejected a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Comparison,
    SubRequest,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Comparison => write!(f, "comparison"),
            LineKind::SubRequest => write!(f, "sub-request"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TxnError {
    #[error("invalid {kind} line: {line}")]
    InvalidInputLine { kind: LineKind, line: String },

    #[error("failed to read transaction input: {0}")]
    InputReadFailure(#[source] io::Error),

    #[error("connection failure: {0}")]
    ConnectionFailure(String),

    #[error("transaction submission failed: {0}")]
    SubmissionFailure(String),

    #[error("bad arguments: {0}")]
    BadArgs(String),

    #[error("failed to write output: {0}")]
    OutputFailure(#[source] io::Error),
}

impl TxnError {
    /// The offending line is kept for display; invalid UTF-8 is replaced
    pub(crate) fn invalid_comparison(line: &[u8]) -> Self {
        Self::InvalidInputLine {
            kind: LineKind::Comparison,
            line: String::from_utf8_lossy(line).into_owned(),
        }
    }

    pub(crate) fn invalid_sub_request(line: &[u8]) -> Self {
        Self::InvalidInputLine {
            kind: LineKind::SubRequest,
            line: String::from_utf8_lossy(line).into_owned(),
        }
    }

    /// Process exit status this error terminates the command with
    pub fn exit_code(&self) -> i32 {
        match self {
            TxnError::InvalidInputLine { .. } | TxnError::InputReadFailure(_) => EXIT_INVALID_INPUT,
            TxnError::ConnectionFailure(_) => EXIT_BAD_CONNECTION,
            TxnError::BadArgs(_) => EXIT_BAD_ARGS,
            TxnError::SubmissionFailure(_) | TxnError::OutputFailure(_) => EXIT_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, TxnError>;
