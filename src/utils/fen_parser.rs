//! FEN-to-position parser.
//!
//! Produces a detached [`FenPosition`]; `GameState::load_fen` installs it and
//! derives the hash, king cache and repetition table from it. Fields after the
//! board may be omitted and then default to `w - - 0 1`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_square, coords_to_square, square_row};

/// Position fields decoded from one FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenPosition {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

fn invalid(message: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(message.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<FenPosition> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().unwrap_or("w");
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_square = parse_en_passant_square(en_passant_part)?;
    if let Some(target) = en_passant_square {
        validate_en_passant_target(&board, side_to_move, target, en_passant_part)?;
    }
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("bad halfmove clock '{halfmove_part}'")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("bad fullmove number '{fullmove_part}'")))?;

    Ok(FenPosition {
        board,
        side_to_move,
        castling_rights,
        en_passant_square,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != 8 {
        return Err(invalid(format!("expected 8 ranks, found {}", rows.len())));
    }

    let mut board = Board::empty();
    for (row, row_text) in rows.iter().enumerate() {
        let mut file = 0u8;

        for ch in row_text.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(invalid(format!("bad empty-square count '{ch}'")));
                }
                file += run as u8;
                if file > 8 {
                    return Err(invalid(format!("rank {} has more than 8 files", 8 - row)));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("bad piece character '{ch}'")))?;
            if file >= 8 {
                return Err(invalid(format!("rank {} has more than 8 files", 8 - row)));
            }
            board.set(coords_to_square(file, row as u8), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank {} does not contain 8 files", 8 - row)));
        }
    }

    for color in [Color::White, Color::Black] {
        let kings = board.count_pieces(Piece::new(color, PieceKind::King));
        if kings != 1 {
            return Err(invalid(format!("expected one {color:?} king, found {kings}")));
        }
    }

    board.refresh_king_squares();
    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("bad side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(format!("bad castling character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .ok_or_else(|| invalid(format!("bad en-passant square '{en_passant_part}'")))?;
    // Only the third and sixth ranks can hold a target.
    if !matches!(square_row(square), 2 | 5) {
        return Err(invalid(format!("en-passant square '{en_passant_part}' is not on rank 3 or 6")));
    }
    Ok(Some(square))
}

/// The target must sit on the mover's capture rank, be empty, and have the
/// pawn that just double-pushed directly behind it.
fn validate_en_passant_target(
    board: &Board,
    side_to_move: Color,
    target: Square,
    en_passant_part: &str,
) -> ChessResult<()> {
    let (expected_row, pushed_pawn) = match side_to_move {
        Color::White => (2, target.wrapping_add(16)),
        Color::Black => (5, target.wrapping_sub(16)),
    };

    if square_row(target) != expected_row {
        return Err(invalid(format!(
            "en-passant square '{en_passant_part}' does not match the side to move"
        )));
    }
    if board.piece_at(target).is_some() {
        return Err(invalid(format!("en-passant square '{en_passant_part}' is occupied")));
    }
    if board.piece_at(pushed_pawn) != Some(Piece::new(side_to_move.opposite(), PieceKind::Pawn)) {
        return Err(invalid(format!(
            "no pawn stands behind en-passant square '{en_passant_part}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn parse_starting_fen() {
        let pos = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.castling_rights, CASTLE_ALL);
        assert_eq!(pos.en_passant_square, None);
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.fullmove_number, 1);
        assert_eq!(pos.board.occupied().count(), 32);
        assert_eq!(pos.board.king_square(Color::White), algebraic_to_square("e1"));
        assert_eq!(pos.board.king_square(Color::Black), algebraic_to_square("e8"));
        assert_eq!(
            pos.board.piece_at(algebraic_to_square("d8").expect("d8 should parse")),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
    }

    #[test]
    fn missing_trailing_fields_take_defaults() {
        let pos = parse_fen("4k3/8/8/8/8/8/8/4K3").expect("board-only FEN should parse");
        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.castling_rights, 0);
        assert_eq!(pos.fullmove_number, 1);
    }

    #[test]
    fn rejects_wrong_rank_count() {
        let err = parse_fen("4k3/8/8/8/8/8/4K3 w - - 0 1").expect_err("7 ranks should fail");
        assert!(matches!(err, ChessError::InvalidFen(_)));
    }

    #[test]
    fn rejects_rank_not_summing_to_eight() {
        for fen in [
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/9/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/44K3 w - - 0 1",
        ] {
            let err = parse_fen(fen).expect_err("bad rank should fail");
            assert!(matches!(err, ChessError::InvalidFen(_)), "{fen}");
        }
    }

    #[test]
    fn rejects_bad_fields() {
        for fen in [
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w KX - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e4 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - a 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
            // No black pawn on e5 behind the target.
            "4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1",
            // Rank 3 target with White to move.
            "4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1",
            // Occupied target.
            "4k3/8/4n3/3pP3/8/8/8/4K3 w - d6 0 2",
        ] {
            assert!(parse_fen(fen).is_err(), "{fen} should fail");
        }
    }

    #[test]
    fn accepts_en_passant_target_behind_a_pushed_pawn() {
        let white = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN should parse");
        assert_eq!(white.en_passant_square, algebraic_to_square("d6"));

        let black = parse_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_eq!(black.en_passant_square, algebraic_to_square("e3"));
    }
}
