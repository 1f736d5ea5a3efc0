//! Full legal move generation pipeline.
//!
//! Per-piece pseudo-legal generation, then a make/test/unmake filter that
//! drops every candidate leaving the mover's own king attacked.

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::is_on_board;

/// Every move obeying piece movement rules for the side to move, legal or not.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<Move> {
    let side = game_state.side_to_move();
    let mut out = Vec::with_capacity(64);

    for (from, piece) in game_state.board().occupied() {
        if piece.color == side {
            generate_piece_moves(game_state, from, piece, &mut out);
        }
    }

    out
}

fn generate_piece_moves(game_state: &GameState, from: Square, piece: Piece, out: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, from, piece, out),
        PieceKind::Knight => generate_knight_moves(game_state, from, piece, out),
        PieceKind::Bishop => generate_bishop_moves(game_state, from, piece, out),
        PieceKind::Rook => generate_rook_moves(game_state, from, piece, out),
        PieceKind::Queen => generate_queen_moves(game_state, from, piece, out),
        PieceKind::King => generate_king_moves(game_state, from, piece, out),
    }
}

/// Legal moves for the side to move. The state is borrowed mutably for the
/// make/unmake filter and is restored exactly before returning.
pub fn generate_legal_moves(game_state: &mut GameState) -> ChessResult<Vec<Move>> {
    let pseudo = generate_pseudo_legal_moves(game_state);
    filter_legal(game_state, pseudo)
}

/// Legal moves of the piece on `from`; empty when `from` is off the board,
/// empty, or holds a piece of the side not to move.
pub fn generate_legal_moves_from(game_state: &mut GameState, from: Square) -> ChessResult<Vec<Move>> {
    if !is_on_board(from) {
        return Ok(Vec::new());
    }
    let Some(piece) = game_state.board().piece_at(from) else {
        return Ok(Vec::new());
    };
    if piece.color != game_state.side_to_move() {
        return Ok(Vec::new());
    }

    let mut pseudo = Vec::new();
    generate_piece_moves(game_state, from, piece, &mut pseudo);
    filter_legal(game_state, pseudo)
}

/// Stops at the first legal move found.
pub fn has_legal_move(game_state: &mut GameState) -> ChessResult<bool> {
    let mover = game_state.side_to_move();
    for mv in generate_pseudo_legal_moves(game_state) {
        let undo = apply_move(game_state, &mv)?;
        let legal = !is_king_in_check(game_state, mover);
        undo_move(game_state, &mv, &undo);
        if legal {
            return Ok(true);
        }
    }
    Ok(false)
}

fn filter_legal(game_state: &mut GameState, pseudo: Vec<Move>) -> ChessResult<Vec<Move>> {
    let mover = game_state.side_to_move();
    let mut legal = Vec::with_capacity(pseudo.len());

    for mv in pseudo {
        let undo = apply_move(game_state, &mv)?;
        let leaves_king_attacked = is_king_in_check(game_state, mover);
        undo_move(game_state, &mv, &undo);

        if !leaves_king_attacked {
            legal.push(mv);
        }
    }

    Ok(legal)
}
