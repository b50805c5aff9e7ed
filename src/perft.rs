//! Perft: exhaustive legal-move-tree node counting, for validating the move
//! generator and benchmarking it.

use std::time::Instant;

use crate::{position::Position, square::Square};

/// Builder pattern to configure a perft run.
pub struct PerftConfig {
    depth: u8,
    iterative: bool,
    bulk_counting: bool,
    divide: bool,
    bench: bool,
    show_board: bool,
}
impl PerftConfig {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            iterative: false,
            bulk_counting: true,
            divide: false,
            bench: false,
            show_board: false,
        }
    }

    /// If set, prints the starting board before the run. Disable when the
    /// output is meant to be parsed.
    pub fn show_board(mut self, value: bool) -> Self {
        self.show_board = value;
        self
    }

    /// If set, runs every depth from 1 up to the maximum instead of only the
    /// maximum.
    pub fn iterative_deepening(mut self, value: bool) -> Self {
        self.iterative = value;
        self
    }

    /// If set, horizon nodes report their legal move count instead of being
    /// expanded one by one.
    pub fn bulk_counting(mut self, value: bool) -> Self {
        self.bulk_counting = value;
        self
    }

    /// If set, prints the node count under each root move.
    pub fn divide_moves(mut self, value: bool) -> Self {
        self.divide = value;
        self
    }

    /// If set, prints the time and speed of each completed depth.
    pub fn benchmark(mut self, value: bool) -> Self {
        self.bench = value;
        self
    }

    /// Runs the configured perft on the given position, printing results to
    /// stdout and returning the node count of the final depth.
    pub fn go(&self, position: &Position) -> u64 {
        if self.show_board {
            for rank in (0..8).rev() {
                for file in 0..8 {
                    match position.piece_at(Square::new(file, rank)) {
                        Some((kind, colour)) => print!("{} ", kind.to_fen_char(colour)),
                        None => print!(". "),
                    }
                }
                println!();
            }
            println!("{position}");
        }
        if self.depth == 0 {
            println!("depth 0: 1 nodes");
            return 1;
        }
        let mut nodes = 0;
        for depth in (if self.iterative { 1 } else { self.depth })..=self.depth {
            let start = Instant::now();
            nodes = position
                .legal_moves()
                .into_iter()
                .map(|mv| {
                    let mv_nodes = perft(&position.apply(mv), depth - 1, self.bulk_counting);
                    if self.divide {
                        println!("{mv}: {mv_nodes} nodes");
                    }
                    mv_nodes
                })
                .sum();
            let elapsed = start.elapsed().as_secs_f64();
            println!("depth {depth}: {nodes} nodes");
            if self.bench {
                println!(
                    "\ttook {elapsed:.3}s ({})",
                    human_readable_nps(nodes as f64 / elapsed)
                );
            }
        }
        nodes
    }
}

/// Counts the leaves of the legal move tree of `position` at `depth`.
pub fn perft(position: &Position, depth: u8, bulk_counting: bool) -> u64 {
    if depth == 0 {
        1
    } else if depth == 1 && bulk_counting {
        position.legal_moves().len() as u64
    } else {
        position
            .legal_moves()
            .into_iter()
            .map(|mv| perft(&position.apply(mv), depth - 1, bulk_counting))
            .sum()
    }
}

fn human_readable_nps(nps: f64) -> String {
    if nps > 1_000_000_000. {
        format!("{:.3}Gnps", nps / 1_000_000_000.)
    } else if nps > 1_000_000. {
        format!("{:.3}Mnps", nps / 1_000_000.)
    } else if nps > 1_000. {
        format!("{:.3}Knps", nps / 1_000.)
    } else {
        format!("{nps:.3}nps")
    }
}
