//! Precomputed attack sets for leaper pieces and classical ray-scan attacks
//! for sliders.
//!
//! The leaper tables are built once on first use and shared for the lifetime
//! of the process; they are never mutated afterwards. Sliding attacks walk
//! their rays against the given occupancy, stopping at (and including) the
//! first blocker.

use std::sync::OnceLock;

use crate::{
    bitboard::Bitboard,
    piece::{Colour, NUM_COLOURS},
    square::Square,
};

struct LeaperTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; NUM_COLOURS],
}

fn tables() -> &'static LeaperTables {
    static TABLES: OnceLock<LeaperTables> = OnceLock::new();
    TABLES.get_or_init(|| LeaperTables {
        knight: leaper_table(&[
            (-2, -1),
            (-2, 1),
            (-1, -2),
            (-1, 2),
            (1, -2),
            (1, 2),
            (2, -1),
            (2, 1),
        ]),
        king: leaper_table(&[
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ]),
        pawn: [
            leaper_table(&[(1, -1), (1, 1)]),
            leaper_table(&[(-1, -1), (-1, 1)]),
        ],
    })
}

fn leaper_table(jumps: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for square in Square::all() {
        let mut attacks = Bitboard::EMPTY;
        for &(dr, df) in jumps {
            let rank = square.rank() as i8 + dr;
            let file = square.file() as i8 + df;
            if (0..8).contains(&rank) && (0..8).contains(&file) {
                attacks |= Square::new(file as u8, rank as u8).bitboard();
            }
        }
        table[square.index()] = attacks;
    }
    table
}

/// Squares a knight on `square` attacks.
#[inline]
pub fn knight_attacks(square: Square) -> Bitboard {
    tables().knight[square.index()]
}

/// Squares a king on `square` attacks.
#[inline]
pub fn king_attacks(square: Square) -> Bitboard {
    tables().king[square.index()]
}

/// Squares a pawn of the given colour on `square` attacks (captures only,
/// never pushes).
#[inline]
pub fn pawn_attacks(colour: Colour, square: Square) -> Bitboard {
    tables().pawn[colour.index()][square.index()]
}

const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn ray_attacks(square: Square, occupied: Bitboard, rays: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in rays {
        let mut rank = square.rank() as i8 + dr;
        let mut file = square.file() as i8 + df;
        while (0..8).contains(&rank) && (0..8).contains(&file) {
            let target = Square::new(file as u8, rank as u8);
            attacks |= target.bitboard();
            if occupied.contains(target) {
                break;
            }
            rank += dr;
            file += df;
        }
    }
    attacks
}

/// Squares a rook on `square` attacks given the current occupancy.
#[inline]
pub fn rook_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(square, occupied, &ORTHOGONAL_RAYS)
}

/// Squares a bishop on `square` attacks given the current occupancy.
#[inline]
pub fn bishop_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(square, occupied, &DIAGONAL_RAYS)
}

/// Squares a queen on `square` attacks given the current occupancy.
#[inline]
pub fn queen_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(square, occupied) | bishop_attacks(square, occupied)
}
