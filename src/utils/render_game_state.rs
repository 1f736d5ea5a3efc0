//! Text views of the board: a character matrix for rendering layers and a
//! Unicode diagram for terminals and test failure output.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Marker used for empty squares in [`board_matrix`].
pub const EMPTY_SQUARE_CHAR: char = '.';

/// 8×8 FEN piece letters, rank 8 first and file a first in each row.
pub fn board_matrix(board: &Board) -> [[char; 8]; 8] {
    let mut matrix = [[EMPTY_SQUARE_CHAR; 8]; 8];
    for (row, cells) in matrix.iter_mut().enumerate() {
        for (file, cell) in cells.iter_mut().enumerate() {
            if let Some(piece) = board.piece_at_coords(file as u8, row as u8) {
                *cell = piece.to_fen_char();
            }
        }
    }
    matrix
}

/// Render the board to a Unicode string, White at the bottom.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8u8 {
        let rank = char::from(b'8' - row);
        out.push(rank);
        out.push(' ');

        for file in 0..8u8 {
            match board.piece_at_coords(file, row) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
