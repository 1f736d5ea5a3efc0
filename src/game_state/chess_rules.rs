//! Canonical chess-rule constants.
//!
//! Static rule literals: the starting position, the promotion choices, draw
//! thresholds and the home squares that castling depends on.

use crate::game_state::chess_types::{Color, PieceKind, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Promotion choices in generation order.
pub const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Half-moves without a pawn move or capture that trigger the fifty-move rule.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position that make a threefold repetition.
pub const REPETITION_LIMIT: u32 = 3;

// 0x88 squares, row 0 is the eighth rank.
pub const A8: Square = 0x00;
pub const E8: Square = 0x04;
pub const H8: Square = 0x07;
pub const A1: Square = 0x70;
pub const E1: Square = 0x74;
pub const H1: Square = 0x77;

#[inline]
pub const fn king_home_square(color: Color) -> Square {
    match color {
        Color::White => E1,
        Color::Black => E8,
    }
}

/// Row a pawn of `color` double-pushes from.
#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row a pawn of `color` promotes on.
#[inline]
pub const fn promotion_row(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

/// One step forward for a pawn of `color`, as a 0x88 delta.
#[inline]
pub const fn pawn_forward(color: Color) -> i8 {
    match color {
        Color::White => -16,
        Color::Black => 16,
    }
}
