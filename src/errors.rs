//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type returned by fallible operations in the
//! crate. Rejected moves are not errors: they are reported through
//! `BoardStatus::Invalid`. Broken invariants (a missing king, a stale board handle)
//! are logic bugs and panic instead of producing a value here.

use thiserror::Error;

use crate::game_state::chess_types::PieceKind;

/// Unified error type for the chess engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// Every board in the pool is in use.
    ///
    /// This is fatal: either the pool is undersized for the requested search depth
    /// or a handle was leaked somewhere. Retrying will not help.
    #[error("board pool exhausted: all {capacity} boards are in use")]
    PoolExhausted { capacity: usize },

    /// A FEN string had malformed structure.
    #[error("invalid FEN string: {0}")]
    InvalidFenString(String),

    /// An unexpected character was found in the piece placement field of a FEN string.
    #[error("invalid FEN token '{0}'")]
    InvalidFenToken(char),

    /// A square or move in long algebraic notation could not be parsed.
    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraicString(String),

    /// Pawns may only promote to a knight, bishop, rook or queen.
    #[error("{0:?} is not a valid promotion piece")]
    InvalidPromotionPiece(PieceKind),
}

/// Result alias used by every fallible engine operation.
pub type ChessResult<T> = Result<T, ChessErrors>;
