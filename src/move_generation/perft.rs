//! Perft: exhaustive legal-move tree counting for move generator validation.

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_move};
use crate::moves::move_descriptions::{Move, MoveFlags};

/// Leaf statistics, classified by the move that reached each leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count of the legal move tree to `depth`. The state is restored
/// before returning, including on error.
pub fn perft(game_state: &mut GameState, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generate_legal_moves(game_state)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in &moves {
        let undo = apply_move(game_state, mv)?;
        let child = perft(game_state, depth - 1);
        undo_move(game_state, mv, &undo);
        nodes += child?;
    }

    Ok(nodes)
}

/// Like [`perft`], with per-leaf move classification.
pub fn perft_counts(game_state: &mut GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state)? {
        let undo = apply_move(game_state, &mv)?;
        let child = if depth == 1 {
            classify_leaf(game_state, &mv)
        } else {
            perft_counts(game_state, depth - 1)
        };
        undo_move(game_state, &mv, &undo);
        total.merge(child?);
    }

    Ok(total)
}

/// Per-root-move leaf counts, in generation order, keyed by coordinate text.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> ChessResult<Vec<(String, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let moves = generate_legal_moves(game_state)?;
    let mut out = Vec::with_capacity(moves.len());
    for mv in &moves {
        let undo = apply_move(game_state, mv)?;
        let child = perft(game_state, depth - 1);
        undo_move(game_state, mv, &undo);
        out.push((mv.to_lan(), child?));
    }

    Ok(out)
}

fn classify_leaf(game_state: &mut GameState, mv: &Move) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    if mv.is_capture() {
        counts.captures = 1;
    }
    if mv.flags.contains(MoveFlags::EN_PASSANT) {
        counts.en_passant = 1;
    }
    if mv.flags.is_castle() {
        counts.castles = 1;
    }
    if mv.promotion.is_some() {
        counts.promotions = 1;
    }
    if is_king_in_check(game_state, game_state.side_to_move()) {
        counts.checks = 1;
        if !has_legal_move(game_state)? {
            counts.checkmates = 1;
        }
    }

    Ok(counts)
}
