//! Immutable board state and the move application that transitions it.

use crate::{
    attacks,
    bitboard::Bitboard,
    castling_rights::CastlingRights,
    moves::{Move, MoveKind},
    piece::{Colour, Piece, PieceKind, NUM_COLOURS, NUM_PIECE_KINDS},
    square::Square,
    zobrist,
};

/// A complete chess position.
///
/// Positions are immutable value types: [`Position::apply`] returns a fresh
/// successor and never touches the original, so positions can be shared
/// across threads freely. The incremental Zobrist hash travels with the
/// position and is updated move by move, never recomputed from scratch.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    bitboards: [[Bitboard; NUM_PIECE_KINDS]; NUM_COLOURS],
    side_to_move: Colour,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
}

impl Position {
    /// An empty board with white to move. Only useful as a base for FEN
    /// parsing, which places pieces onto it.
    pub(crate) fn empty() -> Self {
        Self {
            bitboards: [[Bitboard::EMPTY; NUM_PIECE_KINDS]; NUM_COLOURS],
            side_to_move: Colour::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    /// The standard starting position.
    pub fn initial() -> Self {
        let mut position = Self::empty();
        position.castling_rights = CastlingRights::full();
        position.hash ^= zobrist::castling_hash(position.castling_rights);

        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            position.add_piece(Square::new(file, 0), kind, Colour::White);
            position.add_piece(Square::new(file, 1), PieceKind::Pawn, Colour::White);
            position.add_piece(Square::new(file, 7), kind, Colour::Black);
            position.add_piece(Square::new(file, 6), PieceKind::Pawn, Colour::Black);
        }
        position
    }

    /// The set of squares occupied by pieces of the given kind and colour.
    #[inline(always)]
    pub fn pieces(&self, colour: Colour, kind: PieceKind) -> Bitboard {
        self.bitboards[colour.index()][kind.index()]
    }

    /// The set of squares occupied by pieces of the given colour.
    #[inline]
    pub fn colour_occupancy(&self, colour: Colour) -> Bitboard {
        self.bitboards[colour.index()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    /// The set of all occupied squares.
    #[inline]
    pub fn occupancy(&self) -> Bitboard {
        self.colour_occupancy(Colour::White) | self.colour_occupancy(Colour::Black)
    }

    /// The piece standing on the given square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        for colour in [Colour::White, Colour::Black] {
            for kind in PieceKind::ALL {
                if self.pieces(colour, kind).contains(square) {
                    return Some((kind, colour));
                }
            }
        }
        None
    }

    /// The square of the given colour's king, or `None` on degenerate boards
    /// without one.
    #[inline]
    pub fn king_square(&self, colour: Colour) -> Option<Square> {
        self.pieces(colour, PieceKind::King).lowest()
    }

    /// The colour whose turn it is.
    #[inline(always)]
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    /// The current castling rights.
    #[inline(always)]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// The en passant target square, set exactly when the previous move was a
    /// double pawn push.
    #[inline(always)]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    /// Number of plies since the last capture or pawn move.
    #[inline(always)]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Move counter, starting at 1 and incremented after each black move.
    #[inline(always)]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// The incremental Zobrist hash of this position.
    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub(crate) fn add_piece(&mut self, square: Square, kind: PieceKind, colour: Colour) {
        self.bitboards[colour.index()][kind.index()] |= square.bitboard();
        self.hash ^= zobrist::piece_hash(colour, kind, square);
    }

    fn remove_piece(&mut self, square: Square, kind: PieceKind, colour: Colour) {
        self.bitboards[colour.index()][kind.index()] &= !square.bitboard();
        self.hash ^= zobrist::piece_hash(colour, kind, square);
    }

    pub(crate) fn set_side_to_move(&mut self, colour: Colour) {
        if self.side_to_move != colour {
            self.hash ^= zobrist::side_to_move_hash();
        }
        self.side_to_move = colour;
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.hash ^=
            zobrist::castling_hash(self.castling_rights) ^ zobrist::castling_hash(rights);
        self.castling_rights = rights;
    }

    pub(crate) fn set_en_passant(&mut self, square: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= zobrist::en_passant_hash(old);
        }
        if let Some(new) = square {
            self.hash ^= zobrist::en_passant_hash(new);
        }
        self.en_passant = square;
    }

    pub(crate) fn set_clocks(&mut self, halfmove: u16, fullmove: u16) {
        self.halfmove_clock = halfmove;
        self.fullmove_number = fullmove;
    }

    /// Checks if `square` is attacked by any piece of `by`.
    pub fn is_square_attacked(&self, square: Square, by: Colour) -> bool {
        let occupancy = self.occupancy();
        let queens = self.pieces(by, PieceKind::Queen);

        // A pawn of `by` attacks `square` exactly when a pawn of the other
        // colour on `square` would attack it back.
        attacks::pawn_attacks(by.inverse(), square)
            .intersects(self.pieces(by, PieceKind::Pawn))
            || attacks::knight_attacks(square).intersects(self.pieces(by, PieceKind::Knight))
            || attacks::king_attacks(square).intersects(self.pieces(by, PieceKind::King))
            || attacks::bishop_attacks(square, occupancy)
                .intersects(self.pieces(by, PieceKind::Bishop) | queens)
            || attacks::rook_attacks(square, occupancy)
                .intersects(self.pieces(by, PieceKind::Rook) | queens)
    }

    /// Checks if the side to move's king is attacked.
    pub fn is_in_check(&self) -> bool {
        match self.king_square(self.side_to_move) {
            Some(square) => self.is_square_attacked(square, self.side_to_move.inverse()),
            None => false,
        }
    }

    /// Checks if the position is drawn by the fifty-move rule (halfmove clock
    /// of 100 plies or more). Repetition and insufficient-material draws are
    /// tracked by callers that keep game history.
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Applies a move, returning the successor position.
    ///
    /// This is a pure mechanical transition: no legality check happens here,
    /// the move generator is responsible for only producing applicable moves.
    /// Applying a move whose origin square is empty returns the position
    /// unchanged.
    pub fn apply(&self, mv: Move) -> Self {
        let Some((kind, us)) = self.piece_at(mv.from()) else {
            return *self;
        };
        let them = us.inverse();
        let from = mv.from();
        let to = mv.to();
        let mut next = *self;

        let captured = self.piece_at(to);
        if let Some((captured_kind, captured_colour)) = captured {
            next.remove_piece(to, captured_kind, captured_colour);
        }

        next.remove_piece(from, kind, us);
        match mv.kind() {
            MoveKind::Normal => next.add_piece(to, kind, us),
            MoveKind::Promotion => next.add_piece(to, mv.promotion_target(), us),
            MoveKind::EnPassant => {
                next.add_piece(to, PieceKind::Pawn, us);
                // The captured pawn sits one rank behind the arrival square.
                let victim = to.offset(if us.is_white() { -8 } else { 8 });
                next.remove_piece(victim, PieceKind::Pawn, them);
            }
            MoveKind::Castling => {
                next.add_piece(to, PieceKind::King, us);
                let rank = from.rank();
                let (rook_from, rook_to) = if to.file() > from.file() {
                    (Square::new(7, rank), Square::new(5, rank))
                } else {
                    (Square::new(0, rank), Square::new(3, rank))
                };
                next.remove_piece(rook_from, PieceKind::Rook, us);
                next.add_piece(rook_to, PieceKind::Rook, us);
            }
        }

        let mut rights = self.castling_rights;
        match kind {
            PieceKind::King => rights.disallow(us),
            PieceKind::Rook => {
                let rank = if us.is_white() { 0 } else { 7 };
                if from == Square::new(0, rank) {
                    rights.disallow_queenside(us);
                } else if from == Square::new(7, rank) {
                    rights.disallow_kingside(us);
                }
            }
            _ => (),
        }
        if captured.is_some() {
            match to {
                Square::A1 => rights.disallow_queenside(Colour::White),
                Square::H1 => rights.disallow_kingside(Colour::White),
                Square::A8 => rights.disallow_queenside(Colour::Black),
                Square::H8 => rights.disallow_kingside(Colour::Black),
                _ => (),
            }
        }
        next.set_castling_rights(rights);

        let double_push = kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2;
        next.set_en_passant(if double_push {
            Some(from.offset(if us.is_white() { 8 } else { -8 }))
        } else {
            None
        });

        let resets_clock = kind == PieceKind::Pawn || captured.is_some();
        next.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        if us.is_black() {
            next.fullmove_number += 1;
        }
        next.set_side_to_move(them);
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

/// Equality covers placement, side to move, castling rights and the en
/// passant target. The move clocks are deliberately excluded so that
/// repetition-style comparisons work.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.bitboards == other.bitboards
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant == other.en_passant
    }
}
impl Eq for Position {}
impl std::hash::Hash for Position {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn initial_position_layout() {
        let position = Position::initial();
        assert_eq!(position.piece_at(sq("e1")), Some((PieceKind::King, Colour::White)));
        assert_eq!(position.piece_at(sq("d8")), Some((PieceKind::Queen, Colour::Black)));
        assert_eq!(position.piece_at(sq("e4")), None);
        assert_eq!(position.occupancy().count(), 32);
        assert_eq!(position.side_to_move(), Colour::White);
        assert_eq!(position.castling_rights(), CastlingRights::full());
        assert!(!position.is_in_check());
    }

    #[test]
    fn apply_leaves_the_original_untouched() {
        let position = Position::initial();
        let successor = position.apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(position, Position::initial());
        assert_ne!(position, successor);
        assert_eq!(successor.piece_at(sq("e4")), Some((PieceKind::Pawn, Colour::White)));
        assert_eq!(successor.piece_at(sq("e2")), None);
        assert_eq!(successor.side_to_move(), Colour::Black);
    }

    #[test]
    fn double_push_sets_en_passant_and_other_moves_clear_it() {
        let position = Position::initial();
        let after_e4 = position.apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(after_e4.en_passant_square(), Some(sq("e3")));

        let after_nf6 = after_e4.apply(Move::new(sq("g8"), sq("f6")));
        assert_eq!(after_nf6.en_passant_square(), None);
    }

    #[test]
    fn en_passant_capture_removes_the_pushed_pawn() {
        let position: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let next = position.apply(Move::new_en_passant(sq("e5"), sq("d6")));
        assert_eq!(next.piece_at(sq("d6")), Some((PieceKind::Pawn, Colour::White)));
        assert_eq!(next.piece_at(sq("d5")), None);
        assert_eq!(next.piece_at(sq("e5")), None);
    }

    #[test]
    fn castling_relocates_the_rook() {
        let position: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let kingside = position.apply(Move::new_castling(sq("e1"), sq("g1")));
        assert_eq!(kingside.piece_at(sq("g1")), Some((PieceKind::King, Colour::White)));
        assert_eq!(kingside.piece_at(sq("f1")), Some((PieceKind::Rook, Colour::White)));
        assert_eq!(kingside.piece_at(sq("h1")), None);
        assert!(!kingside.castling_rights().kingside_allowed(Colour::White));
        assert!(!kingside.castling_rights().queenside_allowed(Colour::White));
        assert!(kingside.castling_rights().kingside_allowed(Colour::Black));

        let queenside = position.apply(Move::new_castling(sq("e1"), sq("c1")));
        assert_eq!(queenside.piece_at(sq("c1")), Some((PieceKind::King, Colour::White)));
        assert_eq!(queenside.piece_at(sq("d1")), Some((PieceKind::Rook, Colour::White)));
        assert_eq!(queenside.piece_at(sq("a1")), None);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let position: Position = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let next = position.apply(Move::new_promotion(sq("b7"), sq("b8"), PieceKind::Queen));
        assert_eq!(next.piece_at(sq("b8")), Some((PieceKind::Queen, Colour::White)));
        assert!(next.pieces(Colour::White, PieceKind::Pawn).is_empty());
    }

    #[test]
    fn rook_moves_and_corner_captures_clear_rights() {
        let position: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let after_rook_move = position.apply(Move::new(sq("h1"), sq("h4")));
        assert!(!after_rook_move.castling_rights().kingside_allowed(Colour::White));
        assert!(after_rook_move.castling_rights().queenside_allowed(Colour::White));

        let after_capture = position.apply(Move::new(sq("a1"), sq("a8")));
        assert!(!after_capture.castling_rights().queenside_allowed(Colour::Black));
        assert!(after_capture.castling_rights().kingside_allowed(Colour::Black));
    }

    #[test]
    fn clocks_follow_captures_and_pawn_moves() {
        let position = Position::initial();
        let after_knight = position.apply(Move::new(sq("g1"), sq("f3")));
        assert_eq!(after_knight.halfmove_clock(), 1);
        assert_eq!(after_knight.fullmove_number(), 1);

        let after_black = after_knight.apply(Move::new(sq("b8"), sq("c6")));
        assert_eq!(after_black.halfmove_clock(), 2);
        assert_eq!(after_black.fullmove_number(), 2);

        let after_pawn = after_black.apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(after_pawn.halfmove_clock(), 0);
    }

    #[test]
    fn fifty_move_rule() {
        let drawn: Position = "4k3/8/8/8/8/8/8/4K3 w - - 100 80".parse().unwrap();
        assert!(drawn.is_draw());
        let not_yet: Position = "4k3/8/8/8/8/8/8/4K3 w - - 99 80".parse().unwrap();
        assert!(!not_yet.is_draw());
    }

    #[test]
    fn check_detection() {
        let direct: Position = "4k3/8/8/8/8/8/4R3/4K3 b - - 0 1".parse().unwrap();
        assert!(direct.is_in_check());

        // Bishop steps away and discovers the rook behind it.
        let before: Position = "4k3/8/8/8/4B3/8/8/4RK2 w - - 0 1".parse().unwrap();
        assert!(!before.is_in_check());
        let discovered = before.apply(Move::new(sq("e4"), sq("d5")));
        assert!(discovered.is_in_check());

        let quiet = before.apply(Move::new(sq("f1"), sq("g1")));
        assert!(!quiet.is_in_check());
    }

    #[test]
    fn hash_is_incremental_and_deterministic() {
        let a = Position::initial().apply(Move::new(sq("e2"), sq("e4")));
        let b = Position::initial().apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a, b);
        assert_ne!(a.hash(), Position::initial().hash());

        // Same placement reached through a different move order hashes alike.
        let via_nf3 = Position::initial()
            .apply(Move::new(sq("g1"), sq("f3")))
            .apply(Move::new(sq("g8"), sq("f6")))
            .apply(Move::new(sq("f3"), sq("g1")))
            .apply(Move::new(sq("f6"), sq("g8")));
        assert_eq!(via_nf3.hash(), Position::initial().hash());
        assert_eq!(via_nf3, Position::initial());
    }
}
