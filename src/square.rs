//! Square indexing for 8x8 bitboards, in little-endian rank-file order
//! (a1 = 0, h8 = 63).

use crate::bitboard::Bitboard;

/// A single square of the chessboard.
///
/// Absence of a square ("no square") is represented as `Option<Square>`
/// rather than a sentinel value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);
impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    /// Instantiates a square from file and rank indices (both 0-7).
    #[inline(always)]
    pub const fn new(file: u8, rank: u8) -> Self {
        Self(rank << 3 | file)
    }

    /// Instantiates a square from its index.
    ///
    /// Returns `None` if the index is more than 63.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Returns the index of the square (0-63).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the file index of the square (0 for the a-file, 7 for the h-file).
    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// Returns the rank index of the square (0 for rank 1, 7 for rank 8).
    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// Returns a bitboard containing only this square.
    #[inline(always)]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1 << self.0)
    }

    /// Translates this square by a signed index delta without bounds checking
    /// against board edges. The caller guarantees the result stays on the board.
    #[inline(always)]
    pub(crate) const fn offset(self, delta: i8) -> Self {
        Self(self.0.wrapping_add_signed(delta))
    }

    /// Parses an algebraic coordinate such as `e4`.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Self::new(file as u8 - b'a', rank as u8 - b'1'))
    }

    /// An iterator over all squares, ordered from a1 to h8.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..64).map(Square)
    }

    /// An iterator over all squares in FEN order: rank 8 down to rank 1,
    /// a-file to h-file within each rank.
    pub fn fen_order() -> impl Iterator<Item = Self> {
        (0..8)
            .rev()
            .flat_map(|rank| (0..8).map(move |file| Square::new(file, rank)))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}
impl std::fmt::Debug for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
impl std::str::FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s).ok_or(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn index_layout() {
        assert_eq!(Square::A1.index(), 0);
        assert_eq!(Square::H1.index(), 7);
        assert_eq!(Square::A8.index(), 56);
        assert_eq!(Square::H8.index(), 63);
        assert_eq!(Square::new(4, 3).to_string(), "e4");
    }

    #[test]
    fn algebraic_round_trip() {
        for sq in Square::all() {
            assert_eq!(Square::from_algebraic(&sq.to_string()), Some(sq));
        }
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("e"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn fen_order_starts_at_a8() {
        let mut squares = Square::fen_order();
        assert_eq!(squares.next(), Some(Square::A8));
        assert_eq!(squares.next(), Some(Square::B8));
        assert_eq!(squares.last(), Some(Square::H1));
    }
}
