//! In-place move execution and its exact inverse.
//!
//! `apply_move` validates everything it needs before touching the state, so an
//! `Err` leaves the position untouched. The returned [`UndoState`] must be
//! handed back to `undo_move` together with the same move, in LIFO order.

use tracing::trace;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{pawn_forward, A1, A8, H1, H8};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{Move, MoveFlags};
use crate::utils::algebraic::offset_square;

pub fn apply_move(game_state: &mut GameState, mv: &Move) -> ChessResult<UndoState> {
    let mover = game_state.side_to_move;
    let moved = game_state
        .board
        .piece_at(mv.from)
        .ok_or(ChessError::NoPieceOnSquare { square: mv.from })?;
    if moved.color != mover {
        return Err(ChessError::MoveOutOfTurn {
            mover: moved.color,
            to_move: mover,
        });
    }

    let captured_square = capture_square(game_state, mv, mover)?;
    let captured_piece = captured_square.and_then(|sq| game_state.board.piece_at(sq));

    let undo = UndoState {
        prev_side_to_move: mover,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_zobrist_key: game_state.zobrist_key,
        prev_king_square: game_state.board.king_square(mover),
        moved_piece: moved,
        captured_piece,
        captured_square,
    };

    let keys = &game_state.keys;
    let mut key = game_state.zobrist_key;
    key ^= keys.castling_key(game_state.castling_rights);
    if let Some(ep) = game_state.en_passant_square {
        key ^= keys.en_passant_key(ep);
    }

    let board = &mut game_state.board;
    if let (Some(sq), Some(piece)) = (captured_square, captured_piece) {
        board.set(sq, None);
        key ^= keys.piece_key(piece, sq);
    }

    board.set(mv.from, None);
    key ^= keys.piece_key(moved, mv.from);
    let placed = if mv.flags.contains(MoveFlags::PROMOTION) {
        Piece::new(mover, mv.promotion.unwrap_or(PieceKind::Queen))
    } else {
        moved
    };
    board.set(mv.to, Some(placed));
    key ^= keys.piece_key(placed, mv.to);

    if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
        if let Some(rook) = board.take(rook_from) {
            board.set(rook_to, Some(rook));
            key ^= keys.piece_key(rook, rook_from) ^ keys.piece_key(rook, rook_to);
        }
    }

    if moved.kind == PieceKind::King {
        board.set_king_square(mover, Some(mv.to));
    }

    let mut rights = game_state.castling_rights;
    if moved.kind == PieceKind::King {
        rights &= match mover {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }
    for square in [mv.from, mv.to] {
        rights &= !corner_right(square);
    }
    game_state.castling_rights = rights;
    key ^= keys.castling_key(rights);

    game_state.en_passant_square = if mv.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH) {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };
    if let Some(ep) = game_state.en_passant_square {
        key ^= keys.en_passant_key(ep);
    }

    if moved.kind == PieceKind::Pawn || captured_piece.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = mover.opposite();
    key ^= keys.side_to_move_key();
    game_state.zobrist_key = key;

    trace!(mv = %mv.to_lan(), zobrist = key, "applied move");
    Ok(undo)
}

/// Reverse `apply_move`. Restores every field, including the hash, from `undo`.
pub fn undo_move(game_state: &mut GameState, mv: &Move, undo: &UndoState) {
    let mover = undo.prev_side_to_move;
    let board = &mut game_state.board;

    if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
        if let Some(rook) = board.take(rook_to) {
            board.set(rook_from, Some(rook));
        }
    }

    board.set(mv.to, None);
    board.set(mv.from, Some(undo.moved_piece));
    if let (Some(sq), Some(piece)) = (undo.captured_square, undo.captured_piece) {
        board.set(sq, Some(piece));
    }
    board.set_king_square(mover, undo.prev_king_square);

    game_state.side_to_move = mover;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.zobrist_key = undo.prev_zobrist_key;

    trace!(mv = %mv.to_lan(), "undid move");
}

/// Square of the piece a move removes, checked against the board.
fn capture_square(game_state: &GameState, mv: &Move, mover: Color) -> ChessResult<Option<Square>> {
    let board = &game_state.board;

    if mv.flags.contains(MoveFlags::EN_PASSANT) {
        let behind = offset_square(mv.to, -pawn_forward(mover))
            .ok_or(ChessError::MissingEnPassantPawn { square: mv.to })?;
        return match board.piece_at(behind) {
            Some(p) if p == Piece::new(mover.opposite(), PieceKind::Pawn) => Ok(Some(behind)),
            _ => Err(ChessError::MissingEnPassantPawn { square: behind }),
        };
    }

    if mv.flags.contains(MoveFlags::CAPTURE) {
        return match board.piece_at(mv.to) {
            Some(_) => Ok(Some(mv.to)),
            None => Err(ChessError::MissingCapturedPiece { square: mv.to }),
        };
    }

    Ok(None)
}

fn castling_rook_squares(mv: &Move) -> Option<(Square, Square)> {
    if mv.flags.contains(MoveFlags::KING_CASTLE) {
        Some((mv.to + 1, mv.to - 1))
    } else if mv.flags.contains(MoveFlags::QUEEN_CASTLE) {
        Some((mv.to - 2, mv.to + 1))
    } else {
        None
    }
}

/// Right lost when a piece leaves or lands on a rook's home corner.
const fn corner_right(square: Square) -> CastlingRights {
    match square {
        A1 => CASTLE_WHITE_QUEENSIDE,
        H1 => CASTLE_WHITE_KINGSIDE,
        A8 => CASTLE_BLACK_QUEENSIDE,
        H8 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
