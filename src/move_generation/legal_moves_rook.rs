use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_slider_moves, ROOK_DIRECTIONS};
use crate::moves::move_descriptions::Move;

pub fn generate_rook_moves(game_state: &GameState, from: Square, rook: Piece, out: &mut Vec<Move>) {
    push_slider_moves(game_state.board(), from, rook, &ROOK_DIRECTIONS, out);
}
