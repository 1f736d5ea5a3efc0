//! 0x88 mailbox board.
//!
//! 128 slots, of which the 64 with `index & 0x88 == 0` are real squares. The
//! king squares are cached next to the grid; the move executor keeps that
//! cache in sync, the board itself never updates it implicitly.

use crate::game_state::chess_types::*;
use crate::utils::algebraic::{all_squares, coords_to_square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 128],
    king_squares: [Option<Square>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [None; 128],
            king_squares: [None; 2],
        }
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// `None` for empty slots and for indexes past the grid.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares.get(square as usize).copied().flatten()
    }

    #[inline]
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Writes past the grid are ignored.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(slot) = self.squares.get_mut(square as usize) {
            *slot = piece;
        }
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares.get_mut(square as usize).and_then(Option::take)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn set_king_square(&mut self, color: Color, square: Option<Square>) {
        self.king_squares[color.index()] = square;
    }

    /// Rebuild the king cache from the grid. Used after bulk placement (FEN).
    pub fn refresh_king_squares(&mut self) {
        self.king_squares = [None; 2];
        for sq in all_squares() {
            if let Some(Piece {
                color,
                kind: PieceKind::King,
            }) = self.piece_at(sq)
            {
                self.king_squares[color.index()] = Some(sq);
            }
        }
    }

    /// Occupied squares with their pieces, a8 first.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        all_squares().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn count_pieces(&self, piece: Piece) -> usize {
        self.occupied().filter(|&(_, p)| p == piece).count()
    }

    /// Piece on `(file, row)` with row 0 being the eighth rank.
    pub fn piece_at_coords(&self, file: u8, row: u8) -> Option<Piece> {
        if file > 7 || row > 7 {
            return None;
        }
        self.piece_at(coords_to_square(file, row))
    }
}
