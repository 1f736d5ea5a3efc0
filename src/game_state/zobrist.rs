//! Zobrist hashing support for position identity and repetition tracking.
//!
//! Every `GameState` owns one `ZobristKeys` table, filled once from a seeded
//! `StdRng` when the state is constructed. Loading another FEN into the same
//! state reuses the table, so hashes stay comparable for the whole lifetime
//! of the instance.

use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    // [color][piece_kind][0x88 square]
    piece_square: [[[u64; 128]; 6]; 2],
    castling: [u64; 4],
    en_passant_file: [u64; 8],
    side_to_move: u64,
}

impl ZobristKeys {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut piece_square = [[[0u64; 128]; 6]; 2];
        for color in &mut piece_square {
            for piece in color {
                for key in piece {
                    *key = rng.next_u64();
                }
            }
        }

        let mut castling = [0u64; 4];
        for key in &mut castling {
            *key = rng.next_u64();
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.next_u64();
        }

        Self {
            piece_square,
            castling,
            en_passant_file,
            side_to_move: rng.next_u64(),
        }
    }

    #[inline]
    pub fn piece_key(&self, piece: Piece, square: Square) -> u64 {
        self.piece_square[piece.color.index()][piece.kind.index()][square as usize]
    }

    /// XOR of the keys of every castling bit set in `rights`.
    #[inline]
    pub fn castling_key(&self, rights: CastlingRights) -> u64 {
        CASTLING_BITS
            .iter()
            .zip(self.castling.iter())
            .filter(|(bit, _)| rights & **bit != 0)
            .fold(0u64, |acc, (_, key)| acc ^ key)
    }

    #[inline]
    pub fn en_passant_key(&self, square: Square) -> u64 {
        self.en_passant_file[(square & 7) as usize]
    }

    /// Toggled on every half-move; present in the hash when Black is to move.
    #[inline]
    pub fn side_to_move_key(&self) -> u64 {
        self.side_to_move
    }

    /// Full hash of a position, computed from scratch.
    pub fn compute(
        &self,
        board: &Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
    ) -> u64 {
        let mut key = board
            .occupied()
            .fold(0u64, |acc, (sq, piece)| acc ^ self.piece_key(piece, sq));

        key ^= self.castling_key(castling_rights);

        if let Some(ep) = en_passant_square {
            key ^= self.en_passant_key(ep);
        }

        if side_to_move == Color::Black {
            key ^= self.side_to_move_key();
        }

        key
    }
}

/// Recompute the hash of `game_state` without looking at its stored key.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    game_state.zobrist_keys().compute(
        game_state.board(),
        game_state.side_to_move(),
        game_state.castling_rights(),
        game_state.en_passant_square(),
    )
}
