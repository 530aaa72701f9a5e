//! nogo-mc: a Monte Carlo NoGo engine.
//!
//! ## Usage
//!
//! - `nogo-mc` - Show a demo
//! - `nogo-mc gtp` - Start GTP server for GUI integration
//! - `nogo-mc demo` - Play a short self-play game
//!
//! Engine flags (`--size`, `--policy`, `--num-sim`, ...) go before the
//! subcommand. Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nogo_mc::board::{Board, Move};
use nogo_mc::config::{AllocatorKind, EngineConfig, PolicyKind};
use nogo_mc::constants::{DEFAULT_BOARD_SIZE, DEFAULT_EXPLORATION, DEFAULT_NUM_SIM, DEFAULT_PLY_LIMIT};
use nogo_mc::coord::format_move;
use nogo_mc::gtp::GtpEngine;
use nogo_mc::patterns::PatternWeights;
use nogo_mc::search::Engine;

/// nogo-mc: a one-ply Monte Carlo NoGo engine
#[derive(Parser)]
#[command(name = "nogo-mc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Board size (2-25)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Rollout policy: random or pattern
    #[arg(long, default_value = "random")]
    policy: PolicyKind,

    /// Simulations per candidate move
    #[arg(long, default_value_t = DEFAULT_NUM_SIM)]
    num_sim: u32,

    /// Maximum plies per playout
    #[arg(long, default_value_t = DEFAULT_PLY_LIMIT)]
    ply_limit: usize,

    /// Spread simulations with UCB1 instead of evenly
    #[arg(long)]
    bandit: bool,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = DEFAULT_EXPLORATION)]
    exploration: f64,

    /// Seed for reproducible searches
    #[arg(long)]
    seed: Option<u64>,

    /// Pattern weight file, one `<index> <weight>` line per pattern
    #[arg(long, value_name = "PATH")]
    weights: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Play a short self-play game and print the board
    Demo,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let allocator = if self.bandit {
            AllocatorKind::Bandit
        } else {
            AllocatorKind::FixedSplit
        };
        let config = EngineConfig::default()
            .with_policy(self.policy)
            .with_simulations(self.num_sim)
            .with_ply_limit(self.ply_limit)
            .with_allocator(allocator)
            .with_exploration(self.exploration);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn load_weights(&self) -> Result<PatternWeights> {
        match &self.weights {
            Some(path) => PatternWeights::load(path)
                .with_context(|| format!("failed to load pattern weights from {}", path.display())),
            None => {
                if self.policy == PolicyKind::PatternWeighted {
                    warn!("pattern policy without --weights; every pattern weighs the same");
                }
                Ok(PatternWeights::default())
            }
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nogo_mc=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let board = Board::new(cli.size).context("invalid --size")?;
    let config = cli.engine_config();
    let weights = Arc::new(cli.load_weights()?);
    let engine = Engine::new(config, weights).context("invalid engine configuration")?;

    match cli.command {
        Some(Commands::Gtp) => {
            let mut gtp = GtpEngine::new(board, engine);
            gtp.run().context("GTP session failed")?;
        }
        Some(Commands::Demo) | None => run_demo(board, engine)?,
    }
    Ok(())
}

/// Let the engine play both sides until one of them runs out of moves.
fn run_demo(mut board: Board, mut engine: Engine) -> Result<()> {
    println!("nogo-mc: Monte Carlo NoGo engine\n");
    let config = engine.config();
    info!(
        size = board.size(),
        policy = %config.policy,
        allocator = %config.allocator,
        num_sim = config.num_sim,
        "demo started"
    );

    let size = board.size();
    let mut ply = 0;
    loop {
        let color = board.current_player();
        let Some(pt) = engine.get_move(&board, color) else {
            println!("{color:?} has no legal move and loses after {ply} plies.");
            break;
        };
        board.play(Move::Play(pt), color)?;
        ply += 1;
        println!("{ply:3}. {color:?} {}", format_move(Move::Play(pt), size)?);
    }
    println!("\n{board}");
    Ok(())
}
