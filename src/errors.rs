//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by position parsing, move
//! parsing, board mutation and search. Input-related variants
//! (`MalformedPosition`, `MalformedMove`, `NoMatchingMove`,
//! `AmbiguousNotation`) are recoverable and suitable for reporting back to a
//! user. `EmptyHistory` and `PrecallInvariantViolated` mean the caller misused
//! the API and should be treated as bugs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The position string is unparseable or structurally invalid.
    #[error("malformed position: {0}")]
    MalformedPosition(String),

    /// A long algebraic move string cannot be interpreted on the current board.
    #[error("malformed move '{notation}': {reason}")]
    MalformedMove { notation: String, reason: String },

    /// `undo` was called with no move left to revert.
    #[error("undo called with an empty move history")]
    EmptyHistory,

    /// Human notation matched no legal move.
    #[error("no legal move matches '{0}'")]
    NoMatchingMove(String),

    /// Human notation matched more than one legal move.
    #[error("'{notation}' is ambiguous: {candidates} legal moves match")]
    AmbiguousNotation { notation: String, candidates: usize },

    /// Search was started on a position where the side not to move is in check.
    #[error("search precondition violated: {0}")]
    PrecallInvariantViolated(String),
}

pub type ChessResult<T> = Result<T, ChessError>;

impl ChessError {
    pub(crate) fn malformed_position(reason: impl Into<String>) -> Self {
        ChessError::MalformedPosition(reason.into())
    }

    pub(crate) fn malformed_move(notation: &str, reason: impl Into<String>) -> Self {
        ChessError::MalformedMove {
            notation: notation.to_owned(),
            reason: reason.into(),
        }
    }
}
