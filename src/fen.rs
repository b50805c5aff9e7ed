//! Forsyth-Edwards Notation parsing and formatting.
//!
//! Placement, side to move and the numeric clocks are parsed strictly and
//! reject malformed input. The castling and en passant fields are parsed
//! leniently: unrecognized content there degrades to "no rights" / "no
//! target" instead of failing, which matches how real-world FEN sources
//! behave.

use std::str::FromStr;

use thiserror::Error;

use crate::{
    castling_rights::CastlingRights,
    piece::{Colour, PieceKind},
    position::Position,
    square::Square,
};

/// Ways in which FEN parsing can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 whitespace-separated fields, found {0}")]
    MissingFields(usize),
    #[error("placement does not describe exactly 8 ranks")]
    IncompleteBoard,
    #[error("rank {0} does not describe exactly 8 files")]
    IncompleteRank(u8),
    #[error("unrecognized piece character: {0}")]
    UnrecognizedPiece(char),
    #[error("side to move should be 'w' or 'b', found {0:?}")]
    InvalidSideToMove(String),
    #[error("invalid clock field: {0:?}")]
    InvalidClock(String),
}

impl Position {
    /// Parses a six-field FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, side, castling, en_passant, halfmove, fullmove] = fields[..] else {
            return Err(FenError::MissingFields(fields.len()));
        };

        let mut position = Self::empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::IncompleteBoard);
        }
        for (i, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                match c.to_digit(10) {
                    Some(skip) => file += skip as u8,
                    None => {
                        let (kind, colour) = PieceKind::from_fen_char(c)
                            .ok_or(FenError::UnrecognizedPiece(c))?;
                        if file >= 8 {
                            return Err(FenError::IncompleteRank(rank + 1));
                        }
                        position.add_piece(Square::new(file, rank), kind, colour);
                        file += 1;
                    }
                }
            }
            if file != 8 {
                return Err(FenError::IncompleteRank(rank + 1));
            }
        }

        match side {
            "w" => position.set_side_to_move(Colour::White),
            "b" => position.set_side_to_move(Colour::Black),
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        }

        // Lenient fields: parse failures degrade to the absent value.
        position.set_castling_rights(castling.parse().unwrap_or(CastlingRights::none()));
        position.set_en_passant(Square::from_algebraic(en_passant));

        let halfmove_clock = halfmove
            .parse()
            .map_err(|_| FenError::InvalidClock(halfmove.to_string()))?;
        let fullmove_number = fullmove
            .parse()
            .map_err(|_| FenError::InvalidClock(fullmove.to_string()))?;
        position.set_clocks(halfmove_clock, fullmove_number);

        Ok(position)
    }

    /// Formats the position as a six-field FEN string, the exact inverse of
    /// [`Position::from_fen`].
    pub fn fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some((kind, colour)) => {
                        if empty_run != 0 {
                            fen.push(char::from_digit(empty_run, 10).unwrap_or('0'));
                            empty_run = 0;
                        }
                        fen.push(kind.to_fen_char(colour));
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run != 0 {
                fen.push(char::from_digit(empty_run, 10).unwrap_or('0'));
            }
            if rank != 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move().is_white() { 'w' } else { 'b' });
        fen.push_str(&format!(" {} ", self.castling_rights()));
        match self.en_passant_square() {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }
        fen.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        ));
        fen
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fen())
    }
}
