//! Error types.
//!
//! Three kinds of failure exist:
//!
//! - [`ParseError`]: malformed text handed to the codec.
//! - [`UsageError`]: a programmer error, such as lowering a set to SQL without an identifier.
//! - [`Error::Invariant`]: the interval algebra reached a state it considers impossible.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Internal inconsistency of the interval algebra. Always a bug.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

/// Malformed set text.
///
/// Positions are byte offsets into the parsed string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("more than two bounds in one interval at position {position}")]
    TooManyFragments { position: usize },

    #[error("unescaped separator at the end of input (position {position})")]
    TrailingSeparator { position: usize },

    #[error("escape character at the end of input")]
    UnterminatedEscape,

    #[error("empty interval at position {position}")]
    EmptyInterval { position: usize },

    #[error("absent marker must form an interval on its own (position {position})")]
    MisplacedAbsent { position: usize },

    #[error("invalid {domain} token {token:?}: {reason}")]
    InvalidToken {
        token: String,
        domain: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("no SQL identifier assigned to the set")]
    MissingIdentifier,

    #[error("{operation} requires a discrete domain, but {domain} is continuous")]
    NotDiscrete {
        domain: &'static str,
        operation: &'static str,
    },

    #[error("{kind} literals are not supported by the {domain} domain")]
    UnsupportedLiteral {
        domain: &'static str,
        kind: &'static str,
    },

    #[error("{value:?} cannot be written as a {domain} token")]
    UnwritableValue { domain: &'static str, value: String },
}
