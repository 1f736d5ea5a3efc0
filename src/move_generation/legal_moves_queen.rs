use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_slider_moves, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::moves::move_descriptions::Move;

pub fn generate_queen_moves(game_state: &GameState, from: Square, queen: Piece, out: &mut Vec<Move>) {
    push_slider_moves(game_state.board(), from, queen, &BISHOP_DIRECTIONS, out);
    push_slider_moves(game_state.board(), from, queen, &ROOK_DIRECTIONS, out);
}
