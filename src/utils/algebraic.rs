//! Square conversions between 0x88 indices, coordinates and algebraic names.
//!
//! Files run `0..=7` for `a..=h`. Rows run `0..=7` from the eighth rank down
//! to the first, matching the order in which FEN lists the ranks.

use crate::game_state::chess_types::Square;

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
const RANKS: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];

/// Pack `(file, row)` into a 0x88 index.
#[inline]
pub const fn coords_to_square(file: u8, row: u8) -> Square {
    (row << 4) | file
}

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square & 7
}

#[inline]
pub const fn square_row(square: Square) -> u8 {
    square >> 4
}

/// A single mask test replaces four range comparisons.
#[inline]
pub const fn is_on_board(square: Square) -> bool {
    square & 0x88 == 0
}

/// Step `delta` from `square`, returning `None` once the step leaves the board.
///
/// Wrapping arithmetic sends every underflow/overflow to an index with bit
/// 0x80 set, so the 0x88 mask rejects it like any other off-board index.
#[inline]
pub const fn offset_square(square: Square, delta: i8) -> Option<Square> {
    let target = square.wrapping_add(delta as u8);
    if is_on_board(target) {
        Some(target)
    } else {
        None
    }
}

/// Algebraic name of an on-board square (for example `e4`).
pub fn square_to_algebraic(square: Square) -> String {
    let mut out = String::with_capacity(2);
    out.push(file_char(square));
    out.push(rank_char(square));
    out
}

#[inline]
pub fn file_char(square: Square) -> char {
    FILES[square_file(square) as usize]
}

#[inline]
pub fn rank_char(square: Square) -> char {
    RANKS[square_row(square) as usize]
}

/// Parse a two-character algebraic square; anything else is `None`.
pub fn algebraic_to_square(text: &str) -> Option<Square> {
    let mut chars = text.chars();
    let file_ch = chars.next()?;
    let rank_ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let file = FILES.iter().position(|&f| f == file_ch)?;
    let row = RANKS.iter().position(|&r| r == rank_ch)?;
    Some(coords_to_square(file as u8, row as u8))
}

/// Every on-board square, a8 first, h1 last.
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0u8..128).filter(|&sq| is_on_board(sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a8"), Some(0x00));
        assert_eq!(algebraic_to_square("h8"), Some(0x07));
        assert_eq!(algebraic_to_square("a1"), Some(0x70));
        assert_eq!(algebraic_to_square("e2"), Some(0x64));
        assert_eq!(square_to_algebraic(0x77), "h1");
        assert_eq!(square_to_algebraic(0x34), "e5");

        for sq in all_squares() {
            assert_eq!(algebraic_to_square(&square_to_algebraic(sq)), Some(sq));
        }
    }

    #[test]
    fn rejects_out_of_range_algebraic() {
        for bad in ["", "e", "i1", "a9", "a0", "E2", "e22", "2e"] {
            assert_eq!(algebraic_to_square(bad), None, "{bad} should not parse");
        }
    }

    #[test]
    fn offsets_stop_at_every_edge() {
        let a8 = coords_to_square(0, 0);
        let h1 = coords_to_square(7, 7);
        assert_eq!(offset_square(a8, -1), None);
        assert_eq!(offset_square(a8, -16), None);
        assert_eq!(offset_square(a8, -17), None);
        assert_eq!(offset_square(h1, 1), None);
        assert_eq!(offset_square(h1, 16), None);
        assert_eq!(offset_square(h1, 33), None);
        assert_eq!(offset_square(a8, 33), Some(coords_to_square(1, 2)));
    }

    #[test]
    fn on_board_count_is_sixty_four() {
        assert_eq!(all_squares().count(), 64);
    }
}
