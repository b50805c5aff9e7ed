//! Compact move representation.
//!
//! A [`Move`] packs everything needed to transition a position into 16 bits:
//! - bits 0-5: origin square
//! - bits 6-11: destination square
//! - bits 12-13: promotion target (knight = 0 .. queen = 3)
//! - bits 14-15: move kind

use crate::{
    piece::{Colour, PieceKind},
    position::Position,
    square::Square,
};

/// The special behaviour attached to a move, if any.
#[repr(u16)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveKind {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// A move from one square to another, with its kind and promotion target
/// packed in.
///
/// Moves are pure data: they carry no reference to the position that produced
/// them, and applying one never checks legality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);
impl Move {
    /// The null move, used as a "no move" sentinel by search and UCI parsing.
    pub const NULL: Self = Self(0);

    const KIND_SHIFT: u16 = 14;
    const PROMOTION_SHIFT: u16 = 12;

    /// A normal move, including ordinary captures and double pawn pushes.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self(from.index() as u16 | (to.index() as u16) << 6)
    }

    /// A pawn promotion, capturing or not.
    #[inline(always)]
    pub const fn new_promotion(from: Square, to: Square, target: PieceKind) -> Self {
        Self(
            Self::new(from, to).0
                | (MoveKind::Promotion as u16) << Self::KIND_SHIFT
                | (target.index() as u16 - 1) << Self::PROMOTION_SHIFT,
        )
    }

    /// An en passant capture.
    #[inline(always)]
    pub const fn new_en_passant(from: Square, to: Square) -> Self {
        Self(Self::new(from, to).0 | (MoveKind::EnPassant as u16) << Self::KIND_SHIFT)
    }

    /// A castling move, encoded as the king's two-square move.
    #[inline(always)]
    pub const fn new_castling(from: Square, to: Square) -> Self {
        Self(Self::new(from, to).0 | (MoveKind::Castling as u16) << Self::KIND_SHIFT)
    }

    /// The origin square.
    #[inline(always)]
    pub const fn from(self) -> Square {
        // Masked to 6 bits, always a valid index.
        match Square::from_index((self.0 & 0x3F) as u8) {
            Some(square) => square,
            None => unreachable!(),
        }
    }

    /// The destination square.
    #[inline(always)]
    pub const fn to(self) -> Square {
        match Square::from_index((self.0 >> 6 & 0x3F) as u8) {
            Some(square) => square,
            None => unreachable!(),
        }
    }

    /// The kind of the move.
    #[inline(always)]
    pub const fn kind(self) -> MoveKind {
        match self.0 >> Self::KIND_SHIFT {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        }
    }

    /// The piece kind a promotion resolves to. Meaningless unless
    /// [`Move::kind`] is [`MoveKind::Promotion`].
    #[inline(always)]
    pub const fn promotion_target(self) -> PieceKind {
        match self.0 >> Self::PROMOTION_SHIFT & 0b11 {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        }
    }

    /// Checks if this is the null sentinel.
    #[inline(always)]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Decodes UCI move text (`e2e4`, `e7e8q`) against the position it is
    /// meant to be played on, which disambiguates castling and en passant.
    ///
    /// Malformed text yields [`Move::NULL`] rather than an error: move text
    /// arrives from untrusted interfaces and rejection is an ordinary code
    /// path there.
    pub fn from_uci(s: &str, position: &Position) -> Self {
        if s.len() != 4 && s.len() != 5 {
            return Self::NULL;
        }
        let (Some(from), Some(to)) = (
            Square::from_algebraic(&s[..2]),
            Square::from_algebraic(&s[2..4]),
        ) else {
            return Self::NULL;
        };

        if s.len() == 5 {
            let target = match s.as_bytes()[4] {
                b'q' => PieceKind::Queen,
                b'r' => PieceKind::Rook,
                b'b' => PieceKind::Bishop,
                b'n' => PieceKind::Knight,
                _ => return Self::NULL,
            };
            return Self::new_promotion(from, to, target);
        }

        match position.piece_at(from) {
            Some((PieceKind::King, _))
                if (from == Square::E1 || from == Square::E8)
                    && from.file().abs_diff(to.file()) == 2 =>
            {
                Self::new_castling(from, to)
            }
            Some((PieceKind::Pawn, _))
                if position.en_passant_square() == Some(to) && from.file() != to.file() =>
            {
                Self::new_en_passant(from, to)
            }
            _ => Self::new(from, to),
        }
    }
}
impl std::fmt::Display for Move {
    /// Formats the move as UCI text. The null move prints as `0000`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if self.kind() == MoveKind::Promotion {
            write!(
                f,
                "{}",
                self.promotion_target().to_fen_char(Colour::Black)
            )?
        }
        Ok(())
    }
}
impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
