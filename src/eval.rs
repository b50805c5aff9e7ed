//! Position evaluation boundary.
//!
//! Search is generic over anything implementing [`Evaluate`], so callers can
//! inject their own scoring. Scores are always from the perspective of the
//! side to move, positive meaning the mover stands better, and their
//! magnitude must stay below the mate bound used by search.

use crate::{
    piece::{Colour, PieceKind},
    position::Position,
};

/// A pure position evaluator.
pub trait Evaluate: Sync {
    /// Scores the position in centipawns from the side to move's
    /// perspective.
    fn evaluate(&self, position: &Position) -> i32;
}

/// Any pure function over positions is an evaluator.
impl<F: Fn(&Position) -> i32 + Sync> Evaluate for F {
    fn evaluate(&self, position: &Position) -> i32 {
        self(position)
    }
}

/// Plain material count, in centipawns.
#[derive(Clone, Copy, Debug, Default)]
pub struct Material;

const PIECE_VALUES: [i32; 5] = [100, 320, 330, 500, 900];

impl Evaluate for Material {
    fn evaluate(&self, position: &Position) -> i32 {
        let us = position.side_to_move();
        let them = us.inverse();
        let side_material = |colour: Colour| {
            PieceKind::ALL[..5]
                .iter()
                .zip(PIECE_VALUES)
                .map(|(&kind, value)| position.pieces(colour, kind).count() as i32 * value)
                .sum::<i32>()
        };
        side_material(us) - side_material(them)
    }
}
