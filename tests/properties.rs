//! Whole-surface properties exercised through the public API.

use gambit::{eval::Material, moves::Move, position::Position, search};

/// Visits every position reachable within `depth` plies.
fn walk(position: &Position, depth: u8, visit: &mut impl FnMut(&Position)) {
    visit(position);
    if depth == 0 {
        return;
    }
    for mv in position.legal_moves() {
        walk(&position.apply(mv), depth - 1, visit);
    }
}

#[test]
fn fen_round_trips_for_all_shallow_positions() {
    walk(&Position::initial(), 2, &mut |position| {
        let reparsed = Position::from_fen(&position.fen()).unwrap();
        assert_eq!(&reparsed, position, "{}", position.fen());
        assert_eq!(reparsed.hash(), position.hash(), "{}", position.fen());
        assert_eq!(reparsed.fen(), position.fen());
    });
}

#[test]
fn successors_of_the_twenty_openers_sum_to_four_hundred() {
    let position = Position::initial();
    let openers = position.legal_moves();
    assert_eq!(openers.len(), 20);
    let total: usize = openers
        .iter()
        .map(|&mv| position.apply(mv).legal_moves().len())
        .sum();
    assert_eq!(total, 400);
}

#[test]
fn apply_is_deterministic_across_equal_positions() {
    let a = Position::from_fen(&Position::initial().fen()).unwrap();
    let b = Position::initial();
    assert_eq!(a, b);
    let mv = Move::from_uci("e2e4", &a);
    assert_eq!(a.apply(mv), b.apply(mv));
    assert_eq!(a.apply(mv).hash(), b.apply(mv).hash());
}

#[test]
fn uci_text_round_trips_for_all_legal_moves() {
    let position: Position =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
    for mv in position.legal_moves() {
        assert_eq!(Move::from_uci(&mv.to_string(), &position), mv);
    }
}

#[test]
fn search_prefers_material_over_nothing() {
    // White to move wins a knight with the depth-2 horizon.
    let position: Position = "4k3/8/8/8/8/2n5/1P6/4K3 w - - 0 1".parse().unwrap();
    let best = search::best_move(&position, 2, &Material);
    assert_eq!(best, Move::from_uci("b2c3", &position));
}
