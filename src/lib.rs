//! # Gambit
//! A chess position engine built on immutable bitboard positions.
//!
//! Positions are pure value types: applying a move yields a fresh successor
//! and never mutates the original, so they can be shared and searched from
//! multiple threads without synchronization. On top of them sit FEN
//! round-tripping, a legal move generator and a fixed-depth alpha-beta
//! search with pluggable evaluation.
//!
//! It is usable as both a library to embed into your own projects and a
//! standalone binary for perft runs and position analysis.

pub mod attacks;
pub mod bitboard;
pub mod castling_rights;
pub mod eval;
pub mod fen;
pub mod movegen;
pub mod moves;
#[cfg(feature = "perft")]
pub mod perft;
pub mod piece;
pub mod position;
pub mod search;
pub mod square;
mod zobrist;
