//! Move representation shared by generation, execution and notation.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

/// Combinable move flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const QUIET: MoveFlags = MoveFlags(0);
    pub const CAPTURE: MoveFlags = MoveFlags(1 << 0);
    pub const DOUBLE_PAWN_PUSH: MoveFlags = MoveFlags(1 << 1);
    pub const KING_CASTLE: MoveFlags = MoveFlags(1 << 2);
    pub const QUEEN_CASTLE: MoveFlags = MoveFlags(1 << 3);
    pub const EN_PASSANT: MoveFlags = MoveFlags(1 << 4);
    pub const PROMOTION: MoveFlags = MoveFlags(1 << 5);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when every flag in `other` is set on `self`.
    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_quiet(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.0 & (Self::KING_CASTLE.0 | Self::QUEEN_CASTLE.0) != 0
    }
}

impl BitOr for MoveFlags {
    type Output = MoveFlags;

    #[inline]
    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for MoveFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: MoveFlags) {
        self.0 |= rhs.0;
    }
}

/// Annotations computed once a move has been played on the real game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub san: String,
    pub check: bool,
    pub mate: bool,
    pub stalemate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub flags: MoveFlags,
    pub promotion: Option<PieceKind>,
    /// Filled when the move is executed through the game facade.
    pub captured: Option<Piece>,
    pub annotations: Option<MoveAnnotations>,
}

impl Move {
    #[inline]
    pub fn new(from: Square, to: Square, piece: Piece, flags: MoveFlags) -> Self {
        Self {
            from,
            to,
            piece,
            flags,
            promotion: None,
            captured: None,
            annotations: None,
        }
    }

    #[inline]
    pub fn promoting(from: Square, to: Square, piece: Piece, flags: MoveFlags, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..Self::new(from, to, piece, flags | MoveFlags::PROMOTION)
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    /// SAN text, when the move was played through the game facade.
    pub fn san(&self) -> Option<&str> {
        self.annotations.as_ref().map(|a| a.san.as_str())
    }

    /// Coordinate notation (`e2e4`, `e7e8q`).
    pub fn to_lan(&self) -> String {
        let mut out = square_to_algebraic(self.from);
        out.push_str(&square_to_algebraic(self.to));
        if let Some(kind) = self.promotion {
            out.push(kind.to_char());
        }
        out
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.san() {
            Some(san) => f.write_str(san),
            None => f.write_str(&self.to_lan()),
        }
    }
}
