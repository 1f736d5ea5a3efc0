use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_leaper_moves, KNIGHT_OFFSETS};
use crate::moves::move_descriptions::Move;

pub fn generate_knight_moves(game_state: &GameState, from: Square, knight: Piece, out: &mut Vec<Move>) {
    push_leaper_moves(game_state.board(), from, knight, &KNIGHT_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn corner_and_centre_knight_counts() {
        let game = GameState::from_fen("N3k3/8/8/3N4/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        for (square, expected) in [("a8", 2), ("d5", 8)] {
            let from = algebraic_to_square(square).expect("square should parse");
            let knight = game.board().piece_at(from).expect("knight should be present");
            let mut out = Vec::new();
            generate_knight_moves(&game, from, knight, &mut out);
            assert_eq!(out.len(), expected, "knight on {square}");
        }
    }
}
