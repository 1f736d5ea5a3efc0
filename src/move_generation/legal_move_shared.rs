//! Direction tables and the leaper/slider emitters shared by the per-piece
//! generators. All deltas are in 0x88 units (one row is 16).

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, MoveFlags};
use crate::utils::algebraic::offset_square;

pub const KNIGHT_OFFSETS: [i8; 8] = [33, 31, 18, 14, -33, -31, -18, -14];
pub const KING_OFFSETS: [i8; 8] = [16, -16, 1, -1, 15, 17, -15, -17];
pub const BISHOP_DIRECTIONS: [i8; 4] = [15, 17, -15, -17];
pub const ROOK_DIRECTIONS: [i8; 4] = [16, -16, 1, -1];

/// One step per offset; lands on empty squares or enemy pieces.
pub fn push_leaper_moves(board: &Board, from: Square, piece: Piece, offsets: &[i8], out: &mut Vec<Move>) {
    for &delta in offsets {
        let Some(to) = offset_square(from, delta) else {
            continue;
        };
        match board.piece_at(to) {
            None => out.push(Move::new(from, to, piece, MoveFlags::QUIET)),
            Some(target) if target.color != piece.color => {
                out.push(Move::new(from, to, piece, MoveFlags::CAPTURE));
            }
            Some(_) => {}
        }
    }
}

/// Walk each ray until the edge or the first piece; an enemy piece is
/// captured, an own piece stops the ray before it.
pub fn push_slider_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[i8],
    out: &mut Vec<Move>,
) {
    for &delta in directions {
        let mut cursor = offset_square(from, delta);
        while let Some(to) = cursor {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to, piece, MoveFlags::QUIET)),
                Some(target) => {
                    if target.color != piece.color {
                        out.push(Move::new(from, to, piece, MoveFlags::CAPTURE));
                    }
                    break;
                }
            }
            cursor = offset_square(to, delta);
        }
    }
}
