//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! The recursion is stateless: no transposition table, no shared best-move
//! cell, no caching of any kind. Every call is an independent computation
//! over immutable positions, which is what makes the root-splitting parallel
//! mode safe without synchronization.

use crate::{
    eval::Evaluate,
    movegen::{is_capture, MoveList},
    moves::Move,
    position::Position,
};

/// Mate bound. Exceeds any magnitude a well-behaved evaluator may return.
pub const MATE_SCORE: i32 = 20_000;

/// Initial search window, strictly wider than any reachable score.
const INFINITY: i32 = 30_000;

/// The outcome of a search: the best move found and its score from the side
/// to move's perspective. The move is [`Move::NULL`] at depth zero and in
/// positions with no legal moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
}

/// Searches `position` to `depth` plies within the `(alpha, beta)` window.
///
/// A window that brackets the true score returns it exactly; a fail-low or
/// fail-high window only returns a bound. Move ordering never changes the
/// score, only which move is reported among equally-scored ties.
pub fn search<E: Evaluate>(
    position: &Position,
    depth: u8,
    alpha: i32,
    beta: i32,
    evaluator: &E,
) -> SearchResult {
    negamax(position, depth, 0, alpha, beta, evaluator)
}

/// Convenience entry point: the best move at the given depth, or
/// [`Move::NULL`] when the position has no legal moves or depth is zero.
pub fn best_move<E: Evaluate>(position: &Position, depth: u8, evaluator: &E) -> Move {
    SearchConfig::new(depth).run(position, evaluator).best_move
}

fn negamax<E: Evaluate>(
    position: &Position,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    evaluator: &E,
) -> SearchResult {
    if depth == 0 {
        return SearchResult {
            best_move: Move::NULL,
            score: evaluator.evaluate(position),
        };
    }

    let mut moves = position.legal_moves();
    if moves.is_empty() {
        return SearchResult {
            best_move: Move::NULL,
            // Mates found closer to the root score higher than farther ones.
            score: if position.is_in_check() {
                -MATE_SCORE + ply as i32
            } else {
                0
            },
        };
    }
    order_captures_first(position, &mut moves);

    let mut best = SearchResult {
        best_move: Move::NULL,
        score: -INFINITY,
    };
    for mv in moves {
        let score = -negamax(
            &position.apply(mv),
            depth - 1,
            ply + 1,
            -beta,
            -alpha,
            evaluator,
        )
        .score;
        if score > best.score {
            best = SearchResult {
                best_move: mv,
                score,
            };
        }
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Stable partition of captures before quiet moves. A cheap ordering
/// heuristic that front-loads likely cutoffs; no finer ordering is applied.
fn order_captures_first(position: &Position, moves: &mut MoveList) {
    let theirs = position.colour_occupancy(position.side_to_move().inverse());
    moves.sort_by_key(|&mv| !is_capture(mv, theirs));
}

/// Configurable search over a position, following the builder pattern.
///
/// ```
/// # use gambit::{position::Position, search::SearchConfig, eval::Material};
/// let result = SearchConfig::new(3)
///     .workers(2)
///     .run(&Position::initial(), &Material);
/// assert!(!result.best_move.is_null());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    depth: u8,
    workers: usize,
}
impl SearchConfig {
    /// A sequential search to the given depth.
    pub fn new(depth: u8) -> Self {
        Self { depth, workers: 1 }
    }

    /// Splits the root move list across up to `workers` threads. Zero means
    /// one thread per available CPU. Each worker searches its root moves with
    /// a full window, so the returned score always equals the sequential one.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = if workers == 0 {
            num_cpus::get()
        } else {
            workers
        };
        self
    }

    /// Runs the search, logging the decision at debug level.
    pub fn run<E: Evaluate>(&self, position: &Position, evaluator: &E) -> SearchResult {
        let result = self.run_inner(position, evaluator);
        log::debug!(
            "depth {}: best move {} with score {}",
            self.depth,
            result.best_move,
            result.score
        );
        result
    }

    fn run_inner<E: Evaluate>(&self, position: &Position, evaluator: &E) -> SearchResult {
        if self.depth == 0 {
            return search(position, 0, -INFINITY, INFINITY, evaluator);
        }
        let mut moves = position.legal_moves();
        if moves.is_empty() || self.workers <= 1 || moves.len() == 1 {
            return search(position, self.depth, -INFINITY, INFINITY, evaluator);
        }
        order_captures_first(position, &mut moves);

        let workers = self.workers.min(moves.len());
        let chunk_size = moves.len().div_ceil(workers);
        let depth = self.depth;

        let best = std::thread::scope(|scope| {
            let handles: Vec<_> = moves
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        let mut best = SearchResult {
                            best_move: Move::NULL,
                            score: -INFINITY,
                        };
                        for &mv in chunk {
                            let score = -negamax(
                                &position.apply(mv),
                                depth - 1,
                                1,
                                -INFINITY,
                                INFINITY,
                                evaluator,
                            )
                            .score;
                            log::debug!("root move {mv}: {score}");
                            if score > best.score {
                                best = SearchResult {
                                    best_move: mv,
                                    score,
                                };
                            }
                        }
                        best
                    })
                })
                .collect();

            handles
                .into_iter()
                .filter_map(|handle| handle.join().ok())
                .max_by_key(|result| result.score)
        });

        match best {
            Some(result) => result,
            // Worker panic; fall back to the sequential baseline.
            None => search(position, self.depth, -INFINITY, INFINITY, evaluator),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::eval::Material;

    fn mv(position: &Position, text: &str) -> Move {
        Move::from_uci(text, position)
    }

    #[test]
    fn depth_zero_is_the_evaluator_identity() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1",
        ] {
            let position: Position = fen.parse().unwrap();
            let result = search(&position, 0, -INFINITY, INFINITY, &Material);
            assert!(result.best_move.is_null());
            assert_eq!(result.score, Material.evaluate(&position));
        }
    }

    #[test]
    fn hanging_queen_gets_captured() {
        let position: Position = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let result = SearchConfig::new(2).run(&position, &Material);
        assert_eq!(result.best_move, mv(&position, "e4d5"));
    }

    #[test]
    fn finds_mate_in_one() {
        let position: Position = "6k1/8/6K1/8/8/8/8/R7 w - - 0 1".parse().unwrap();
        // Depth 2 is the shallowest search that can see the mate: the mated
        // successor must itself be expanded, not just evaluated.
        for depth in [2, 3, 4] {
            let result = SearchConfig::new(depth).run(&position, &Material);
            assert_eq!(result.best_move, mv(&position, "a1a8"), "depth {depth}");
            assert_eq!(result.score, MATE_SCORE - 1, "depth {depth}");
        }
    }

    #[test]
    fn stalemate_scores_zero() {
        let position: Position = "k7/8/1Q6/8/8/8/8/K7 b - - 0 1".parse().unwrap();
        let result = SearchConfig::new(4).run(&position, &Material);
        assert!(result.best_move.is_null());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn checkmated_side_reports_the_mate_bound() {
        let position: Position = "R5k1/8/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let result = search(&position, 3, -INFINITY, INFINITY, &Material);
        assert!(result.best_move.is_null());
        assert_eq!(result.score, -MATE_SCORE);
    }

    #[test]
    fn parallel_score_matches_sequential() {
        let position: Position =
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
                .parse()
                .unwrap();
        let sequential = SearchConfig::new(2).run(&position, &Material);
        let parallel = SearchConfig::new(2).workers(4).run(&position, &Material);
        assert_eq!(sequential.score, parallel.score);
    }

    #[test]
    fn bracketing_window_yields_the_exact_score() {
        let position: Position = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let full = search(&position, 2, -INFINITY, INFINITY, &Material).score;
        let narrow = search(&position, 2, full - 1, full + 1, &Material).score;
        assert_eq!(full, narrow);
    }
}
