use crate::game_state::chess_rules::{pawn_forward, pawn_start_row, promotion_row, PROMOTION_PIECES};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{Move, MoveFlags};
use crate::utils::algebraic::{offset_square, square_row};

pub fn generate_pawn_moves(game_state: &GameState, from: Square, pawn: Piece, out: &mut Vec<Move>) {
    let board = game_state.board();
    let side = pawn.color;
    let forward = pawn_forward(side);

    if let Some(one_step) = offset_square(from, forward) {
        if board.is_empty_square(one_step) {
            push_pawn_move(from, one_step, pawn, MoveFlags::QUIET, out);

            if square_row(from) == pawn_start_row(side) {
                if let Some(two_step) = offset_square(one_step, forward) {
                    if board.is_empty_square(two_step) {
                        out.push(Move::new(from, two_step, pawn, MoveFlags::DOUBLE_PAWN_PUSH));
                    }
                }
            }
        }
    }

    // captures and en-passant
    for side_step in [-1i8, 1i8] {
        let Some(to) = offset_square(from, forward + side_step) else {
            continue;
        };

        match board.piece_at(to) {
            Some(target) if target.color != side => {
                push_pawn_move(from, to, pawn, MoveFlags::CAPTURE, out);
            }
            Some(_) => {}
            None if game_state.en_passant_square() == Some(to) => {
                out.push(Move::new(
                    from,
                    to,
                    pawn,
                    MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
                ));
            }
            None => {}
        }
    }
}

/// Emit a push/capture, fanning out into one move per promotion piece on the
/// last rank.
fn push_pawn_move(from: Square, to: Square, pawn: Piece, flags: MoveFlags, out: &mut Vec<Move>) {
    if square_row(to) == promotion_row(pawn.color) {
        for promo in PROMOTION_PIECES {
            out.push(Move::promoting(from, to, pawn, flags, promo));
        }
    } else {
        out.push(Move::new(from, to, pawn, flags));
    }
}
