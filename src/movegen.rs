//! Move generation: pseudo-legal enumeration plus the single legality filter.
//!
//! Legality is defined entirely by re-derived check status: a pseudo-legal
//! move is legal when, after applying it, the moving side's own king is not
//! attacked. There is no separate pin detection; correctness rests on the
//! attack scan alone, which keeps the surface small and auditable.

use crate::{
    attacks,
    bitboard::Bitboard,
    moves::{Move, MoveKind},
    piece::{Colour, PieceKind},
    position::Position,
    square::Square,
};

/// A stack-allocated move list. 256 slots comfortably exceeds the most moves
/// any reachable chess position allows.
pub type MoveList = heapless::Vec<Move, 256>;

#[inline(always)]
fn push(moves: &mut MoveList, mv: Move) {
    let _ = moves.push(mv);
}

impl Position {
    /// Enumerates every pseudo-legal move for the side to move. Callers must
    /// not rely on the emission order.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let us = self.side_to_move();
        let them = us.inverse();
        let occupancy = self.occupancy();
        let ours = self.colour_occupancy(us);
        let theirs = self.colour_occupancy(them);

        self.pawn_moves(&mut moves, us, occupancy, theirs);

        for from in self.pieces(us, PieceKind::Knight) {
            emit_to_each(&mut moves, from, attacks::knight_attacks(from) & !ours);
        }
        for from in self.pieces(us, PieceKind::Bishop) {
            emit_to_each(&mut moves, from, attacks::bishop_attacks(from, occupancy) & !ours);
        }
        for from in self.pieces(us, PieceKind::Rook) {
            emit_to_each(&mut moves, from, attacks::rook_attacks(from, occupancy) & !ours);
        }
        for from in self.pieces(us, PieceKind::Queen) {
            emit_to_each(&mut moves, from, attacks::queen_attacks(from, occupancy) & !ours);
        }
        for from in self.pieces(us, PieceKind::King) {
            emit_to_each(&mut moves, from, attacks::king_attacks(from) & !ours);
        }

        self.castling_moves(&mut moves, us, them, occupancy);
        moves
    }

    fn pawn_moves(
        &self,
        moves: &mut MoveList,
        us: Colour,
        occupancy: Bitboard,
        theirs: Bitboard,
    ) {
        let (push_delta, start_rank, promotion_rank) = if us.is_white() {
            (8, 1, 7)
        } else {
            (-8, 6, 0)
        };

        for from in self.pieces(us, PieceKind::Pawn) {
            // A pawn standing on its last rank can only come from degenerate
            // FEN input; pushing it would walk off the board.
            if from.rank() == promotion_rank {
                continue;
            }
            let single = from.offset(push_delta);
            if !occupancy.contains(single) {
                emit_pawn_move(moves, from, single, promotion_rank);
                // A double push needs the intermediate square empty too.
                if from.rank() == start_rank {
                    let double = single.offset(push_delta);
                    if !occupancy.contains(double) {
                        push(moves, Move::new(from, double));
                    }
                }
            }
            for to in attacks::pawn_attacks(us, from) {
                if theirs.contains(to) {
                    emit_pawn_move(moves, from, to, promotion_rank);
                } else if self.en_passant_square() == Some(to) {
                    push(moves, Move::new_en_passant(from, to));
                }
            }
        }
    }

    /// Castling eligibility, evaluated entirely on the pre-move position: the
    /// right must be held, the squares between king and rook must be empty,
    /// and neither the king's square nor any square it crosses or lands on
    /// may be attacked.
    fn castling_moves(
        &self,
        moves: &mut MoveList,
        us: Colour,
        them: Colour,
        occupancy: Bitboard,
    ) {
        let rank = if us.is_white() { 0 } else { 7 };
        let king = Square::new(4, rank);
        let rooks = self.pieces(us, PieceKind::Rook);

        if self.castling_rights().kingside_allowed(us) && rooks.contains(Square::new(7, rank)) {
            let transit = [Square::new(5, rank), Square::new(6, rank)];
            let blocked = transit.iter().any(|&square| occupancy.contains(square));
            let attacked = self.is_square_attacked(king, them)
                || transit
                    .iter()
                    .any(|&square| self.is_square_attacked(square, them));
            if !blocked && !attacked {
                push(moves, Move::new_castling(king, Square::new(6, rank)));
            }
        }
        if self.castling_rights().queenside_allowed(us) && rooks.contains(Square::new(0, rank)) {
            let between = [
                Square::new(1, rank),
                Square::new(2, rank),
                Square::new(3, rank),
            ];
            let blocked = between.iter().any(|&square| occupancy.contains(square));
            // The b-file square must be empty but the king never crosses it.
            let transit = [Square::new(3, rank), Square::new(2, rank)];
            let attacked = self.is_square_attacked(king, them)
                || transit
                    .iter()
                    .any(|&square| self.is_square_attacked(square, them));
            if !blocked && !attacked {
                push(moves, Move::new_castling(king, Square::new(2, rank)));
            }
        }
    }

    /// Enumerates every legal move for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        self.pseudo_legal_moves()
            .into_iter()
            .filter(|&mv| self.leaves_king_safe(mv))
            .collect()
    }

    /// Checks if the generator would produce `mv` as a legal move here.
    ///
    /// This is an ordinary boolean code path, not an error: rejecting moves
    /// from untrusted input (UCI text, UIs) is expected high-frequency use.
    pub fn is_legal(&self, mv: Move) -> bool {
        !mv.is_null()
            && self.pseudo_legal_moves().contains(&mv)
            && self.leaves_king_safe(mv)
    }

    /// Resolves bare UCI coordinates against the legal move set, recovering
    /// the move kind for castling and en passant. `promotion` must name the
    /// promotion target exactly when the coordinates describe one.
    ///
    /// Returns `None` when no legal move matches.
    pub fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        self.legal_moves().into_iter().find(|&mv| {
            mv.from() == from
                && mv.to() == to
                && match mv.kind() {
                    MoveKind::Promotion => promotion == Some(mv.promotion_target()),
                    _ => promotion.is_none(),
                }
        })
    }

    fn leaves_king_safe(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let next = self.apply(mv);
        match next.king_square(us) {
            Some(square) => !next.is_square_attacked(square, us.inverse()),
            None => true,
        }
    }

    /// Pseudo-legal moves whose destination is enemy-occupied, plus en
    /// passant. Unfiltered for legality.
    pub fn captures(&self) -> MoveList {
        let theirs = self.colour_occupancy(self.side_to_move().inverse());
        self.pseudo_legal_moves()
            .into_iter()
            .filter(|mv| is_capture(*mv, theirs))
            .collect()
    }

    /// Pseudo-legal moves that capture nothing. Unfiltered for legality.
    pub fn quiet_moves(&self) -> MoveList {
        let theirs = self.colour_occupancy(self.side_to_move().inverse());
        self.pseudo_legal_moves()
            .into_iter()
            .filter(|mv| !is_capture(*mv, theirs))
            .collect()
    }
}

#[inline(always)]
pub(crate) fn is_capture(mv: Move, theirs: Bitboard) -> bool {
    theirs.contains(mv.to()) || mv.kind() == MoveKind::EnPassant
}

fn emit_to_each(moves: &mut MoveList, from: Square, targets: Bitboard) {
    for to in targets {
        push(moves, Move::new(from, to));
    }
}

fn emit_pawn_move(moves: &mut MoveList, from: Square, to: Square, promotion_rank: u8) {
    if to.rank() == promotion_rank {
        for target in PieceKind::PROMOTIONS {
            push(moves, Move::new_promotion(from, to, target));
        }
    } else {
        push(moves, Move::new(from, to));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mv(position: &Position, text: &str) -> Move {
        Move::from_uci(text, position)
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let position = Position::initial();
        assert_eq!(position.pseudo_legal_moves().len(), 20);
        assert_eq!(position.legal_moves().len(), 20);
        assert!(position.captures().is_empty());
        assert_eq!(position.quiet_moves().len(), 20);
    }

    #[test]
    fn double_push_blocked_by_intermediate_square() {
        // A knight on e3 blocks both e2e3 and e2e4.
        let position: Position = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        assert!(!moves.contains(&mv(&position, "e2e3")));
        assert!(!moves.contains(&mv(&position, "e2e4")));

        // A blocker on the destination square only stops the double push.
        let position: Position = "4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        assert!(moves.contains(&mv(&position, "e2e3")));
        assert!(!moves.contains(&mv(&position, "e2e4")));
    }

    #[test]
    fn promotions_emit_four_moves_each() {
        // The b7 pawn can push to b8 or capture either knight, each as four
        // promotion moves.
        let position: Position = "n1n5/1P6/8/8/8/8/8/4K2k w - - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        let promotions: Vec<_> = moves
            .iter()
            .filter(|mv| mv.kind() == MoveKind::Promotion)
            .collect();
        assert_eq!(promotions.len(), 12);
        let captures = position.captures();
        assert_eq!(
            captures
                .iter()
                .filter(|mv| mv.kind() == MoveKind::Promotion)
                .count(),
            8
        );
    }

    #[test]
    fn en_passant_is_generated() {
        let position: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        let ep = mv(&position, "e5d6");
        assert_eq!(ep.kind(), MoveKind::EnPassant);
        assert!(moves.contains(&ep));
        assert!(position.captures().contains(&ep));
        assert!(!position.quiet_moves().contains(&ep));
    }

    #[test]
    fn castling_both_wings_when_clear() {
        let position: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        assert!(moves.contains(&mv(&position, "e1g1")));
        assert!(moves.contains(&mv(&position, "e1c1")));
    }

    #[test]
    fn castling_rejected_while_in_check() {
        let position: Position = "4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        assert!(!moves.contains(&mv(&position, "e1g1")));
        assert!(!moves.contains(&mv(&position, "e1c1")));
    }

    #[test]
    fn castling_rejected_when_transit_square_attacked() {
        // The rook on f2 attacks f1, blocking only the kingside path.
        let position: Position = "4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        assert!(!moves.contains(&mv(&position, "e1g1")));
        assert!(moves.contains(&mv(&position, "e1c1")));
    }

    #[test]
    fn castling_rejected_when_blocked() {
        // The b1 knight blocks queenside castling even though the king never
        // crosses b1.
        let position: Position = "r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        assert!(moves.contains(&mv(&position, "e1g1")));
        assert!(!moves.contains(&mv(&position, "e1c1")));
    }

    #[test]
    fn pinned_piece_moves_are_pseudo_legal_but_not_legal() {
        // The e2 bishop is pinned against the king by the e8 rook.
        let position: Position = "4r3/8/8/8/8/8/4B3/4K3 w - - 0 1".parse().unwrap();
        let pinned_move = mv(&position, "e2d3");
        assert!(position.pseudo_legal_moves().contains(&pinned_move));
        assert!(!position.is_legal(pinned_move));
        let legal = position.legal_moves();
        assert!(!legal.contains(&pinned_move));
        assert!(legal.iter().all(|&mv| position.is_legal(mv)));
    }

    #[test]
    fn is_legal_rejects_moves_the_generator_would_not_produce() {
        let position = Position::initial();
        assert!(position.is_legal(mv(&position, "e2e4")));
        assert!(!position.is_legal(mv(&position, "e2e5")));
        assert!(!position.is_legal(Move::NULL));
        // Moving the opponent's pieces is not legal either.
        assert!(!position.is_legal(mv(&position, "e7e5")));
    }

    #[test]
    fn find_move_recovers_kinds_from_coordinates() {
        let position: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let castle = position
            .find_move(Square::E1, Square::new(6, 0), None)
            .unwrap();
        assert_eq!(castle.kind(), MoveKind::Castling);

        let position: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let ep = position
            .find_move(
                Square::from_algebraic("e5").unwrap(),
                Square::from_algebraic("d6").unwrap(),
                None,
            )
            .unwrap();
        assert_eq!(ep.kind(), MoveKind::EnPassant);

        let position: Position = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let from = Square::from_algebraic("b7").unwrap();
        let to = Square::from_algebraic("b8").unwrap();
        let promotion = position
            .find_move(from, to, Some(PieceKind::Knight))
            .unwrap();
        assert_eq!(promotion.kind(), MoveKind::Promotion);
        assert_eq!(promotion.promotion_target(), PieceKind::Knight);
        // The bare coordinates are ambiguous without a promotion target.
        assert_eq!(position.find_move(from, to, None), None);
    }

    #[test]
    fn find_move_rejects_illegal_coordinates() {
        let position = Position::initial();
        assert_eq!(
            position.find_move(
                Square::from_algebraic("e2").unwrap(),
                Square::from_algebraic("e5").unwrap(),
                None,
            ),
            None
        );
        // Pinned piece moves are pseudo-legal but never resolved.
        let position: Position = "4r3/8/8/8/8/8/4B3/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(
            position.find_move(
                Square::from_algebraic("e2").unwrap(),
                Square::from_algebraic("d3").unwrap(),
                None,
            ),
            None
        );
    }

    #[test]
    fn back_rank_pawns_generate_no_pushes() {
        // Only reachable through hand-written FEN, but it must not walk off
        // the board.
        let position: Position = "P3k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        assert!(moves.iter().all(|mv| mv.from() != Square::A8));

        let position: Position = "4k3/8/8/8/8/8/8/p3K3 b - - 0 1".parse().unwrap();
        let moves = position.pseudo_legal_moves();
        assert!(moves.iter().all(|mv| mv.from() != Square::A1));
    }

    #[test]
    fn checkmate_and_stalemate_have_no_legal_moves() {
        let mated: Position = "R5k1/8/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(mated.is_in_check());
        assert!(mated.legal_moves().is_empty());

        let stalemated: Position = "k7/8/1Q6/8/8/8/8/K7 b - - 0 1".parse().unwrap();
        assert!(!stalemated.is_in_check());
        assert!(stalemated.legal_moves().is_empty());
    }
}
