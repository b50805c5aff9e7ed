use clap::{Parser, Subcommand};
use gambit::eval::Material;
#[cfg(feature = "perft")]
use gambit::perft::PerftConfig;
use gambit::{
    moves::Move, piece::PieceKind, position::Position, search::SearchConfig, square::Square,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Searches a position and prints the best move found
    Analyze {
        /// Search depth in plies
        depth: u8,
        /// Starting position as a FEN string, defaults to the initial position
        #[arg(short, long)]
        position: Option<String>,
        /// UCI moves to play out from the starting position before searching
        #[arg(short, long, num_args = 1..)]
        moves: Vec<String>,
        /// Number of worker threads for the root split, 0 for one per CPU
        #[arg(short, long, default_value_t = 1)]
        workers: usize,
    },
    /// Runs perft (counting all legal move paths up to a certain depth)
    Perft {
        /// Maximum depth to reach
        depth: u8,
        /// Starting position as a FEN string, defaults to the initial position
        #[arg(short, long)]
        position: Option<String>,
        /// Shows move count for each move from the starting position
        #[arg(short)]
        divide: bool,
        /// Generates moves for each depth up to the maximum
        #[arg(short)]
        iterative: bool,
        /// Show timing information
        #[arg(long)]
        bench: bool,
        /// Plays out horizon nodes instead of counting their legal moves
        #[arg(long)]
        no_bulk: bool,
        /// Does not print the board before the run
        #[arg(long)]
        no_board: bool,
    },
}

/// Resolves UCI coordinates against the legal moves of `position`.
fn resolve_move(position: &Position, text: &str) -> Option<Move> {
    if text.len() != 4 && text.len() != 5 {
        return None;
    }
    let from = Square::from_algebraic(&text[..2])?;
    let to = Square::from_algebraic(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return None,
    };
    position.find_move(from, to, promotion)
}

fn play_out(mut position: Position, moves: &[String]) -> Position {
    for text in moves {
        match resolve_move(&position, text) {
            Some(mv) => position = position.apply(mv),
            None => {
                eprintln!("illegal or malformed move {text:?} in {position}");
                std::process::exit(1)
            }
        }
    }
    position
}

fn parse_position(fen: Option<String>) -> Position {
    match fen {
        Some(fen) => match Position::from_fen(&fen) {
            Ok(position) => position,
            Err(e) => {
                eprintln!("invalid FEN: {e}");
                std::process::exit(1)
            }
        },
        None => Position::initial(),
    }
}

fn main() {
    env_logger::init();
    let args = Arguments::parse();

    match args.command {
        Command::Analyze {
            depth,
            position,
            moves,
            workers,
        } => {
            let position = play_out(parse_position(position), &moves);
            log::info!("analyzing {position} at depth {depth}");
            let result = SearchConfig::new(depth)
                .workers(workers)
                .run(&position, &Material);
            println!("bestmove {}", result.best_move);
            println!("score {}", result.score);
        }
        #[cfg(feature = "perft")]
        Command::Perft {
            depth,
            position,
            divide,
            iterative,
            bench,
            no_bulk,
            no_board,
        } => {
            let position = parse_position(position);
            PerftConfig::new(depth)
                .divide_moves(divide)
                .iterative_deepening(iterative)
                .benchmark(bench)
                .bulk_counting(!no_bulk)
                .show_board(!no_board)
                .go(&position);
        }
        #[cfg(not(feature = "perft"))]
        Command::Perft { .. } => {
            eprintln!("gambit has not been compiled with feature `perft`");
        }
    }
}
