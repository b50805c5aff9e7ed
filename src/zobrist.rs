//! Zobrist hashing keys.
//!
//! The key table holds one number per piece placement (12 * 64), one for the
//! side to move, four for castling flags and eight for en passant files. Keys
//! are drawn from a fixed-seed generator so that hashes are stable across
//! processes.

use std::sync::LazyLock;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    castling_rights::CastlingRights,
    piece::{Colour, PieceKind, NUM_PIECE_KINDS},
    square::Square,
};

const SIDE_TO_MOVE_OFFSET: usize = 768;
const CASTLING_OFFSET: usize = 769;
const EN_PASSANT_OFFSET: usize = 773;

static ZOBRIST_KEYS: LazyLock<[u64; 781]> = LazyLock::new(|| {
    let mut rng = SmallRng::seed_from_u64(0x5ca1ab1e_0ddba11);
    let mut keys = [0; 781];
    for key in &mut keys {
        *key = rng.gen()
    }
    keys
});

#[inline(always)]
pub fn piece_hash(colour: Colour, kind: PieceKind, square: Square) -> u64 {
    ZOBRIST_KEYS[colour.index() * NUM_PIECE_KINDS * 64 + kind.index() * 64 + square.index()]
}

#[inline(always)]
pub fn side_to_move_hash() -> u64 {
    ZOBRIST_KEYS[SIDE_TO_MOVE_OFFSET]
}

#[inline(always)]
pub fn castling_hash(rights: CastlingRights) -> u64 {
    rights
        .flag_indices()
        .fold(0, |hash, i| hash ^ ZOBRIST_KEYS[CASTLING_OFFSET + i])
}

#[inline(always)]
pub fn en_passant_hash(square: Square) -> u64 {
    ZOBRIST_KEYS[EN_PASSANT_OFFSET + square.file() as usize]
}
