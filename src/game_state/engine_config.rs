//! Construction-time options for a `GameState`.

use crate::game_state::chess_types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the zobrist key table.
    pub zobrist_seed: u64,
    /// Piece used when a move request reaching the last rank names no
    /// promotion. `None` rejects such requests instead.
    pub default_promotion: Option<PieceKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zobrist_seed: 0x9E37_79B9_7F4A_7C15,
            default_promotion: Some(PieceKind::Queen),
        }
    }
}
