use crate::game_state::chess_rules::{king_home_square, A1, A8, H1, H8};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{push_leaper_moves, KING_OFFSETS};
use crate::moves::move_descriptions::{Move, MoveFlags};

pub fn generate_king_moves(game_state: &GameState, from: Square, king: Piece, out: &mut Vec<Move>) {
    push_leaper_moves(game_state.board(), from, king, &KING_OFFSETS, out);
    generate_castling_moves(game_state, from, king, out);
}

fn generate_castling_moves(game_state: &GameState, from: Square, king: Piece, out: &mut Vec<Move>) {
    let side = king.color;
    if from != king_home_square(side) {
        return;
    }

    let rights = game_state.castling_rights();
    let (kingside_bit, queenside_bit, kingside_rook, queenside_rook) = match side {
        Color::White => (CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE, H1, A1),
        Color::Black => (CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, H8, A8),
    };
    if rights & (kingside_bit | queenside_bit) == 0 {
        return;
    }

    let board = game_state.board();
    let enemy = side.opposite();
    let own_rook = Piece::new(side, PieceKind::Rook);
    if is_square_attacked(board, from, enemy) {
        return;
    }

    if rights & kingside_bit != 0 && board.piece_at(kingside_rook) == Some(own_rook) {
        let (transit, dest) = (from + 1, from + 2);
        if board.is_empty_square(transit)
            && board.is_empty_square(dest)
            && !is_square_attacked(board, transit, enemy)
            && !is_square_attacked(board, dest, enemy)
        {
            out.push(Move::new(from, dest, king, MoveFlags::KING_CASTLE));
        }
    }

    // b-file must be empty too, but it may be attacked.
    if rights & queenside_bit != 0 && board.piece_at(queenside_rook) == Some(own_rook) {
        let (transit, dest, rook_side) = (from - 1, from - 2, from - 3);
        if board.is_empty_square(transit)
            && board.is_empty_square(dest)
            && board.is_empty_square(rook_side)
            && !is_square_attacked(board, transit, enemy)
            && !is_square_attacked(board, dest, enemy)
        {
            out.push(Move::new(from, dest, king, MoveFlags::QUEEN_CASTLE));
        }
    }
}
