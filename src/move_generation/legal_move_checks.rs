//! Attack detection by casting inverse patterns outward from the target.
//!
//! No opponent move list is built, so castling generation can ask for attacks
//! without recursing into legality filtering.

use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};
use crate::utils::algebraic::offset_square;

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    game_state.board().king_square(color)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state.board(), king_sq, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let holds = |sq: Square, kinds: &[PieceKind]| {
        matches!(board.piece_at(sq), Some(p) if p.color == attacker && kinds.contains(&p.kind))
    };

    // A white pawn attacks upward (toward row 0), so it sits below the target.
    let pawn_sources: [i8; 2] = match attacker {
        Color::White => [15, 17],
        Color::Black => [-15, -17],
    };
    if pawn_sources
        .iter()
        .filter_map(|&d| offset_square(square, d))
        .any(|sq| holds(sq, &[PieceKind::Pawn]))
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .filter_map(|&d| offset_square(square, d))
        .any(|sq| holds(sq, &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .filter_map(|&d| offset_square(square, d))
        .any(|sq| holds(sq, &[PieceKind::King]))
    {
        return true;
    }

    ray_hits(board, square, &BISHOP_DIRECTIONS, |sq| {
        holds(sq, &[PieceKind::Bishop, PieceKind::Queen])
    }) || ray_hits(board, square, &ROOK_DIRECTIONS, |sq| {
        holds(sq, &[PieceKind::Rook, PieceKind::Queen])
    })
}

/// True if the first piece met along any ray satisfies `is_attacker`.
fn ray_hits(board: &Board, from: Square, directions: &[i8], is_attacker: impl Fn(Square) -> bool) -> bool {
    for &delta in directions {
        let mut cursor = offset_square(from, delta);
        while let Some(sq) = cursor {
            if !board.is_empty_square(sq) {
                if is_attacker(sq) {
                    return true;
                }
                break;
            }
            cursor = offset_square(sq, delta);
        }
    }
    false
}
