use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Irreversible state captured before a move is applied.
///
/// Board deltas are tiny, so the snapshot is a plain `Copy` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub prev_side_to_move: Color,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
    pub prev_zobrist_key: u64,
    pub prev_king_square: Option<Square>,

    /// Piece that stood on the origin square, put back verbatim on undo.
    pub moved_piece: Piece,

    pub captured_piece: Option<Piece>,
    pub captured_square: Option<Square>,
}

/// One played move on the game history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub undo: UndoState,
    /// Hash recorded in the repetition table once the move was played.
    pub position_key: u64,
}
