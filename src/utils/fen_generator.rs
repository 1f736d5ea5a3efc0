use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{coords_to_square, square_to_algebraic};

pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state.board()),
        side_to_move,
        generate_castling_field(game_state.castling_rights()),
        generate_en_passant_field(game_state.en_passant_square()),
        game_state.halfmove_clock(),
        game_state.fullmove_number()
    )
}

pub fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match board.piece_at(coords_to_square(file, row)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.to_fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = CASTLING_BITS
        .iter()
        .zip(['K', 'Q', 'k', 'q'])
        .filter(|(bit, _)| rights & **bit != 0)
        .map(|(_, ch)| ch)
        .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    square.map_or_else(|| "-".to_owned(), square_to_algebraic)
}
