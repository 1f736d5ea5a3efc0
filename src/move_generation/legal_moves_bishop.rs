use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_slider_moves, BISHOP_DIRECTIONS};
use crate::moves::move_descriptions::Move;

pub fn generate_bishop_moves(game_state: &GameState, from: Square, bishop: Piece, out: &mut Vec<Move>) {
    push_slider_moves(game_state.board(), from, bishop, &BISHOP_DIRECTIONS, out);
}
