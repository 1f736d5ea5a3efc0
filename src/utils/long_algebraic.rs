//! Coordinate-notation move requests (`e2e4`, `e7e8q`) and their resolution
//! against a legal move list.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

/// A caller's move descriptor: from/to squares and an optional promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Parse a 4 or 5 character coordinate move. The promotion letter is
    /// case-insensitive and must name a knight, bishop, rook or queen.
    pub fn parse(text: &str) -> ChessResult<Self> {
        let invalid = || ChessError::InvalidMoveText(text.to_owned());

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }

        let from = algebraic_to_square(&text[0..2]).ok_or_else(invalid)?;
        let to = algebraic_to_square(&text[2..4]).ok_or_else(invalid)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(ch) => match PieceKind::from_char(ch.to_ascii_lowercase()) {
                Some(kind @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)) => {
                    Some(kind)
                }
                _ => return Err(invalid()),
            },
        };

        Ok(Self::new(from, to, promotion))
    }
}

/// Pick the legal move named by `request`. A promotion move without a
/// requested piece falls back to `default_promotion`; with neither, nothing
/// matches. A promotion letter on a non-promoting move is ignored.
pub fn find_matching_move(
    request: &MoveRequest,
    legal_moves: &[Move],
    default_promotion: Option<PieceKind>,
) -> Option<Move> {
    let wanted = request.promotion.or(default_promotion);

    legal_moves
        .iter()
        .filter(|mv| mv.from == request.from && mv.to == request.to)
        .find(|mv| match mv.promotion {
            Some(kind) => wanted == Some(kind),
            None => true,
        })
        .cloned()
}
