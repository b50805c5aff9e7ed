//! Bitboards represent sets of up to 64 squares as single `u64` values and
//! are the sole storage primitive for board occupancy.

use std::iter::FusedIterator;

use crate::square::Square;

/// A set of squares, one bit per square (bit 0 = a1, bit 63 = h8).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub(crate) u64);
impl Bitboard {
    pub const EMPTY: Self = Self(0);

    /// The a-file, used to mask off westward wraps.
    pub(crate) const FILE_A: Self = Self(0x0101010101010101);
    /// The h-file, used to mask off eastward wraps.
    pub(crate) const FILE_H: Self = Self(0x8080808080808080);

    /// Returns the set of all squares on the given rank index (0-7).
    #[inline(always)]
    pub const fn rank(rank: u8) -> Self {
        Self(0xFF << (rank * 8))
    }

    /// Checks if no square is set.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Checks if at least one square is set.
    #[inline(always)]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Checks if a given square is in the set.
    #[inline(always)]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & square.bitboard().0 != 0
    }

    /// Checks if two sets have at least one common square.
    #[inline(always)]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the number of squares in the set.
    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the lowest set square, if any.
    #[inline(always)]
    pub const fn lowest(self) -> Option<Square> {
        Square::from_index(self.0.trailing_zeros() as u8)
    }

    /// Removes and returns the lowest set square, if any.
    #[inline(always)]
    pub fn pop_lowest(&mut self) -> Option<Square> {
        let square = self.lowest()?;
        self.0 &= self.0 - 1;
        Some(square)
    }

    /// The set shifted one rank up. White pawn pushes.
    #[inline(always)]
    pub const fn north(self) -> Self {
        Self(self.0 << 8)
    }

    /// The set shifted one rank down. Black pawn pushes.
    #[inline(always)]
    pub const fn south(self) -> Self {
        Self(self.0 >> 8)
    }

    /// The set shifted one square towards the h-file, dropping wraps.
    #[inline(always)]
    pub const fn east(self) -> Self {
        Self((self.0 & !Self::FILE_H.0) << 1)
    }

    /// The set shifted one square towards the a-file, dropping wraps.
    #[inline(always)]
    pub const fn west(self) -> Self {
        Self((self.0 & !Self::FILE_A.0) >> 1)
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
impl std::ops::BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}
impl std::ops::BitOr for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
impl std::ops::BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}
impl std::ops::BitXor for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}
impl std::ops::BitXorAssign for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}
impl std::ops::Not for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Square> {
        self.pop_lowest()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.count() as usize;
        (count, Some(count))
    }
}
impl ExactSizeIterator for Bitboard {}
impl FusedIterator for Bitboard {}

impl std::fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, square) in Square::fen_order().enumerate() {
            if i % 8 == 0 && i != 0 {
                writeln!(f)?
            }
            write!(f, "{} ", if self.contains(square) { 'x' } else { '.' })?
        }
        Ok(())
    }
}
