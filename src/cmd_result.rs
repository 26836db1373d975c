//! Errors raised while parsing, resolving and dispatching a command line.
//!
//! Every stage fails fast with the most specific error it can. None of these
//! are fatal; the caller decides how to present them.

use thiserror::Error;

use crate::mark::MarkName;

/// Result of parsing or executing one command line.
pub type CmdResult<T> = Result<T, CmdError>;

/// Any failure of a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CmdError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    RangeSyntax(#[from] RangeSyntaxError),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}' (expected wrap or nowrap)")]
    UnknownOption(String),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Coarse classification of a [`CmdError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    RangeSyntax,
    UnknownCommand,
    UnknownOption,
    Resolution,
}

impl CmdError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CmdError::Lex(_) => ErrorKind::Lex,
            CmdError::RangeSyntax(_) => ErrorKind::RangeSyntax,
            CmdError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            CmdError::UnknownOption(_) => ErrorKind::UnknownOption,
            CmdError::Resolution(_) => ErrorKind::Resolution,
        }
    }
}

/// Malformed token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated search: no closing '{delim}' for the one at column {column}")]
    UnterminatedSearch { delim: char, column: usize },
}

/// Structurally invalid range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeSyntaxError {
    /// `,` with no address after it.
    #[error("expected an address after ',' at column {column}")]
    DanglingComma { column: usize },
    /// `,` with no address before it.
    #[error("expected an address before ',' at column {column}")]
    MissingStart { column: usize },
    #[error("invalid mark '{0}' (marks are a to z)")]
    InvalidMark(char),
    #[error("malformed address '{0}'")]
    MalformedAddress(String),
    #[error("malformed offset '{0}'")]
    MalformedOffset(String),
    #[error("empty search pattern at column {column}")]
    EmptyPattern { column: usize },
    /// A valid address in a position the grammar does not allow it.
    #[error("'{address}' cannot be used as a range {position}")]
    MisplacedAddress {
        address: String,
        position: &'static str,
    },
    #[error("unexpected {found} at column {column}")]
    Unexpected { found: String, column: usize },
}

/// Valid syntax that cannot be turned into a line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("mark '{0}' is not set")]
    UnknownMark(MarkName),
    #[error("pattern not found: {0}")]
    PatternNotFound(String),
    #[error("bad pattern '{pattern}': {reason}")]
    BadPattern { pattern: String, reason: String },
    #[error("line {line} is outside the buffer (1 to {length})")]
    OutOfRange { line: i128, length: usize },
    #[error("backwards range {start},{end}")]
    BackwardsRange { start: usize, end: usize },
}
