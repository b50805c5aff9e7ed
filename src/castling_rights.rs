//! Castling rights, packed as four flag bits.

use std::str::FromStr;

use crate::piece::Colour;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CastlingRights(u8);
impl CastlingRights {
    const KINGSIDE_WHITE: u8 = 0b0001;
    const QUEENSIDE_WHITE: u8 = 0b0010;
    const KINGSIDE_BLACK: u8 = 0b0100;
    const QUEENSIDE_BLACK: u8 = 0b1000;
    const FULL: u8 =
        Self::KINGSIDE_WHITE | Self::QUEENSIDE_WHITE | Self::KINGSIDE_BLACK | Self::QUEENSIDE_BLACK;

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    /// No castling rights for either side.
    pub const fn none() -> Self {
        Self(0)
    }

    /// Checks if no one can castle.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_allowed(self, colour: Colour) -> bool {
        let mask = if colour.is_black() {
            Self::KINGSIDE_BLACK
        } else {
            Self::KINGSIDE_WHITE
        };
        self.0 & mask != 0
    }

    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_allowed(self, colour: Colour) -> bool {
        let mask = if colour.is_black() {
            Self::QUEENSIDE_BLACK
        } else {
            Self::QUEENSIDE_WHITE
        };
        self.0 & mask != 0
    }

    /// Disallows kingside castling for a given side.
    #[inline(always)]
    pub fn disallow_kingside(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !Self::KINGSIDE_BLACK
        } else {
            !Self::KINGSIDE_WHITE
        }
    }

    /// Disallows queenside castling for a given side.
    #[inline(always)]
    pub fn disallow_queenside(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !Self::QUEENSIDE_BLACK
        } else {
            !Self::QUEENSIDE_WHITE
        }
    }

    /// Disallows castling altogether for a given side.
    pub fn disallow(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !(Self::KINGSIDE_BLACK | Self::QUEENSIDE_BLACK)
        } else {
            !(Self::KINGSIDE_WHITE | Self::QUEENSIDE_WHITE)
        }
    }

    /// Indices of the set flag bits, for Zobrist key lookup.
    pub(crate) fn flag_indices(self) -> impl Iterator<Item = usize> {
        (0..4).filter(move |i| self.0 & (1 << i) != 0)
    }
}
impl FromStr for CastlingRights {
    type Err = ();

    /// Parses the FEN castling field. Unknown letters are ignored rather than
    /// rejected, matching the lenient treatment of the castling field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rights = 0;
        for c in s.chars() {
            match c {
                'K' => rights |= Self::KINGSIDE_WHITE,
                'Q' => rights |= Self::QUEENSIDE_WHITE,
                'k' => rights |= Self::KINGSIDE_BLACK,
                'q' => rights |= Self::QUEENSIDE_BLACK,
                _ => (),
            }
        }
        Ok(Self(rights))
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }
        if self.kingside_allowed(Colour::White) {
            write!(f, "K")?
        }
        if self.queenside_allowed(Colour::White) {
            write!(f, "Q")?
        }
        if self.kingside_allowed(Colour::Black) {
            write!(f, "k")?
        }
        if self.queenside_allowed(Colour::Black) {
            write!(f, "q")?
        }
        Ok(())
    }
}
