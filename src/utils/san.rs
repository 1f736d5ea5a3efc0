//! Standard Algebraic Notation for moves already generated as legal.

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, MoveFlags};
use crate::utils::algebraic::{
    algebraic_to_square, file_char, rank_char, square_file, square_row, square_to_algebraic,
};

/// SAN of `mv`. `legal_moves` is the full legal list of the position `mv` was
/// played from and is used for disambiguation; `check`/`mate` describe the
/// position after the move.
pub fn move_to_san(mv: &Move, legal_moves: &[Move], check: bool, mate: bool) -> String {
    let mut san = san_body(mv, legal_moves);
    if mate {
        san.push('#');
    } else if check {
        san.push('+');
    }
    san
}

/// SAN without the check/mate suffix.
pub fn san_body(mv: &Move, legal_moves: &[Move]) -> String {
    if mv.flags.contains(MoveFlags::KING_CASTLE) {
        return "O-O".to_owned();
    }
    if mv.flags.contains(MoveFlags::QUEEN_CASTLE) {
        return "O-O-O".to_owned();
    }

    let mut san = String::with_capacity(8);
    if mv.piece.kind == PieceKind::Pawn {
        if mv.is_capture() {
            san.push(file_char(mv.from));
            san.push('x');
        }
        san.push_str(&square_to_algebraic(mv.to));
        if let Some(kind) = mv.promotion {
            san.push('=');
            san.push(kind.to_char().to_ascii_uppercase());
        }
        return san;
    }

    san.push(mv.piece.kind.to_char().to_ascii_uppercase());
    san.push_str(&disambiguation(mv, legal_moves));
    if mv.is_capture() {
        san.push('x');
    }
    san.push_str(&square_to_algebraic(mv.to));
    san
}

/// Origin prefix separating `mv` from same-kind pieces reaching the same
/// square: the file if it is unique, else the rank, else both.
fn disambiguation(mv: &Move, legal_moves: &[Move]) -> String {
    let rivals: Vec<Square> = legal_moves
        .iter()
        .filter(|other| other.to == mv.to && other.piece == mv.piece && other.from != mv.from)
        .map(|other| other.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }

    let shares_file = rivals.iter().any(|&sq| square_file(sq) == square_file(mv.from));
    let shares_rank = rivals.iter().any(|&sq| square_row(sq) == square_row(mv.from));

    match (shares_file, shares_rank) {
        (true, true) => format!("{}{}", file_char(mv.from), rank_char(mv.from)),
        (true, false) => rank_char(mv.from).to_string(),
        _ => file_char(mv.from).to_string(),
    }
}

/// Strip check, mate and annotation glyphs (`+ # ! ?`) from a SAN token.
pub fn trim_san_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

/// Loosely read SAN token, as found in hand-written PGN. Disambiguation is
/// optional and may be over-specified, the capture marker and `=` are
/// optional, and castling may be written with zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanPattern {
    Castle(MoveFlags),
    Piece {
        kind: PieceKind,
        from_file: Option<u8>,
        from_row: Option<u8>,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

impl SanPattern {
    pub fn parse(token: &str) -> Option<Self> {
        let token = trim_san_suffix(token);
        match token {
            "O-O" | "0-0" => return Some(SanPattern::Castle(MoveFlags::KING_CASTLE)),
            "O-O-O" | "0-0-0" => return Some(SanPattern::Castle(MoveFlags::QUEEN_CASTLE)),
            _ => {}
        }
        if !token.is_ascii() {
            return None;
        }

        let (kind, mut rest) = match token.chars().next()? {
            ch @ ('N' | 'B' | 'R' | 'Q' | 'K') => (PieceKind::from_char(ch)?, &token[1..]),
            _ => (PieceKind::Pawn, token),
        };

        let mut promotion = None;
        if kind == PieceKind::Pawn {
            if let Some(last @ ('N' | 'B' | 'R' | 'Q')) = rest.chars().last() {
                promotion = PieceKind::from_char(last);
                rest = rest[..rest.len() - 1].trim_end_matches('=');
            }
        }

        if rest.len() < 2 {
            return None;
        }
        let (prefix, destination) = rest.split_at(rest.len() - 2);
        let to = algebraic_to_square(destination)?;

        let mut from_file = None;
        let mut from_row = None;
        for ch in prefix.chars().filter(|&c| c != 'x') {
            match ch {
                'a'..='h' if from_file.is_none() => from_file = Some(ch as u8 - b'a'),
                '1'..='8' if from_row.is_none() => from_row = Some(b'8' - ch as u8),
                _ => return None,
            }
        }

        Some(SanPattern::Piece {
            kind,
            from_file,
            from_row,
            to,
            promotion,
        })
    }

    pub fn matches(&self, mv: &Move) -> bool {
        match *self {
            SanPattern::Castle(flag) => mv.flags.contains(flag),
            SanPattern::Piece {
                kind,
                from_file,
                from_row,
                to,
                promotion,
            } => {
                mv.piece.kind == kind
                    && mv.to == to
                    && mv.promotion == promotion
                    && !mv.flags.contains(MoveFlags::KING_CASTLE)
                    && !mv.flags.contains(MoveFlags::QUEEN_CASTLE)
                    && from_file.map_or(true, |f| square_file(mv.from) == f)
                    && from_row.map_or(true, |r| square_row(mv.from) == r)
            }
        }
    }
}
