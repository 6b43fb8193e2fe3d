//! Self-play harness
//!
//! Runs engine-vs-engine games from the command line, mostly for smoke
//! testing and eyeballing move quality across the two search backends.

use clap::Parser;
use tracing::info;

use qubic::{Board, Engine, EngineConfig, GameResult, Player, SearchMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ModeArg {
    Alphabeta,
    Mcts,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Alphabeta => SearchMode::AlphaBeta,
            ModeArg::Mcts => SearchMode::Mcts,
        }
    }
}

/// Engine-vs-engine self-play for the 4x4x4 four-in-a-row engine.
#[derive(Debug, Parser)]
#[command(name = "qubic", version, about)]
struct Args {
    /// Search backend for player 1
    #[arg(long, value_enum, default_value = "alphabeta")]
    p1: ModeArg,

    /// Search backend for player 2
    #[arg(long, value_enum, default_value = "mcts")]
    p2: ModeArg,

    /// Time budget per move, in milliseconds
    #[arg(long, default_value_t = 500)]
    budget_ms: u64,

    /// Iterative deepening depth cap
    #[arg(long, default_value_t = 8)]
    depth: i8,

    /// RNG seed for MCTS playouts
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,
}

fn engine_for(args: &Args, mode: ModeArg) -> Engine {
    Engine::with_config(
        EngineConfig::default()
            .with_mode(mode.into())
            .with_time_budget_ms(args.budget_ms)
            .with_max_depth(args.depth)
            .with_seed(args.seed),
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut one = engine_for(&args, args.p1);
    let mut two = engine_for(&args, args.p2);

    let mut tally = (0u32, 0u32, 0u32);
    for game in 1..=args.games {
        one.clear_cache();
        two.clear_cache();

        let mut board = Board::new();
        let mut player = Player::One;
        let outcome = loop {
            if let Some(result) = board.result() {
                break result;
            }
            let engine = match player {
                Player::One => &mut one,
                Player::Two => &mut two,
            };
            let Some(chosen) = engine.choose_move(&board, player) else {
                break GameResult::Draw;
            };
            info!(
                game,
                mover = player.to_cell(),
                x = chosen.best_move.x,
                y = chosen.best_move.y,
                stage = ?chosen.search_type,
                time_ms = chosen.time_ms,
                nodes = chosen.nodes,
                "move"
            );
            board.drop(chosen.best_move, player);
            player = player.opponent();
        };

        match outcome {
            GameResult::Won(Player::One) => tally.0 += 1,
            GameResult::Won(Player::Two) => tally.1 += 1,
            GameResult::Draw => tally.2 += 1,
        }
        info!(game, ?outcome, moves = board.move_count(), "game over");
    }

    info!(
        p1_wins = tally.0,
        p2_wins = tally.1,
        draws = tally.2,
        "self-play finished"
    );
}
