//! Errors used throughout the chess engine.
//!
//! This module defines the canonical error type returned by game logic,
//! parsing utilities, and other core subsystems. `ChessError` is the single
//! error type across the crate to simplify propagation and matching. Each
//! variant carries contextual information where appropriate to aid
//! diagnostics.
//!
//! Only recoverable, caller-facing conditions are represented here (invalid
//! FEN, invalid algebraic text). Internal-consistency violations (the
//! invariants described alongside `Position`) are bugs, not user input
//! problems, and are raised with `debug_assert!` instead.

use thiserror::Error;

/// Unified error type for the chess engine's parsing-facing API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The FEN string did not have the required six whitespace-separated
    /// fields.
    #[error("FEN string '{0}' is missing one or more of its six fields")]
    MalformedFen(String),

    /// The piece-placement field did not describe exactly 8 ranks of 8
    /// files each.
    #[error("FEN piece placement '{0}' is not a valid 8x8 board layout")]
    InvalidFenBoard(String),

    /// An unrecognized character appeared in the piece-placement field.
    #[error("FEN piece placement contains unrecognized character '{0}'")]
    InvalidFenToken(char),

    /// The side-to-move field was neither "w" nor "b".
    #[error("FEN side-to-move field '{0}' must be 'w' or 'b'")]
    InvalidSideToMove(String),

    /// The castling-rights field contained a character outside "KQkq-".
    #[error("FEN castling-rights field '{0}' is invalid")]
    InvalidCastlingRights(String),

    /// The en-passant field was not "-" or a valid algebraic square.
    #[error("FEN en-passant field '{0}' is invalid")]
    InvalidEnPassantSquare(String),

    /// A numeric FEN field (halfmove clock or fullmove number) failed to parse.
    #[error("FEN numeric field '{0}' is not a valid non-negative integer")]
    InvalidFenNumber(String),

    /// A single algebraic square token (e.g. "e4") failed to parse.
    #[error("algebraic square '{0}' is invalid")]
    InvalidAlgebraicSquare(String),

    /// A long-algebraic move string (e.g. "e2e4", "e7e8q") failed to parse.
    #[error("algebraic move string '{0}' is invalid")]
    InvalidAlgebraicMove(String),
}

/// Convenience alias used by fallible parsing entry points.
pub type ChessResult<T> = Result<T, ChessError>;
