//! Piece kinds and colours.

/// Number of different piece kinds (6).
pub const NUM_PIECE_KINDS: usize = 6;

/// Number of different colours (2).
pub const NUM_COLOURS: usize = 2;

/// Complete identification of a piece on the board.
pub type Piece = (PieceKind, Colour);

/// The two sides of a chess game.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Colour {
    White = 0,
    Black = 1,
}
impl Colour {
    /// Returns the opposing colour.
    #[inline(always)]
    pub const fn inverse(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Checks if the colour is white.
    #[inline(always)]
    pub const fn is_white(self) -> bool {
        matches!(self, Self::White)
    }

    /// Checks if the colour is black.
    #[inline(always)]
    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }

    /// Index for colour-indexed tables (white = 0, black = 1).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}
impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.is_black() { "black" } else { "white" })
    }
}

/// The kind of a piece, without colour information.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// All piece kinds, pawn first.
    pub const ALL: [Self; NUM_PIECE_KINDS] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// The four piece kinds a pawn may promote to.
    pub const PROMOTIONS: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    /// Index for kind-indexed tables (pawn = 0 .. king = 5).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parses a FEN piece letter, uppercase for white and lowercase for black.
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let colour = if c.is_ascii_uppercase() {
            Colour::White
        } else {
            Colour::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => Self::Pawn,
            'n' => Self::Knight,
            'b' => Self::Bishop,
            'r' => Self::Rook,
            'q' => Self::Queen,
            'k' => Self::King,
            _ => return None,
        };
        Some((kind, colour))
    }

    /// The FEN letter for this kind, uppercase when the piece is white.
    pub fn to_fen_char(self, colour: Colour) -> char {
        let c = match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        };
        if colour.is_white() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_fen_char(Colour::Black))
    }
}
