//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type of the crate. Parse failures
//! (`InvalidFen`, `InvalidMoveText`, `InvalidPgn`) describe bad caller input
//! and can be shown to a user. The remaining variants are raised by the move executor
//! when the apply/undo discipline has been broken by the caller; they signal
//! a bug and are not meant to be recovered from.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The FEN string could not be parsed into a valid position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A move text (coordinate notation) could not be parsed.
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    /// PGN text could not be parsed or replayed.
    #[error("invalid PGN: {0}")]
    InvalidPgn(String),

    /// A move was applied for the side that is not to move.
    #[error("attempted to move a {mover:?} piece while {to_move:?} is to move")]
    MoveOutOfTurn { mover: Color, to_move: Color },

    /// The from-square of an applied move is empty.
    #[error("no piece on from-square {square:#04x}")]
    NoPieceOnSquare { square: Square },

    /// A capture was applied but the destination square is empty.
    #[error("capture flag set but no piece on {square:#04x}")]
    MissingCapturedPiece { square: Square },

    /// An en-passant capture was applied but no enemy pawn stands behind the target.
    #[error("en-passant flag set but no capturable pawn on {square:#04x}")]
    MissingEnPassantPawn { square: Square },
}

/// Result alias for fallible engine operations.
pub type ChessResult<T> = Result<T, ChessError>;
