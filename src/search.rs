//! One-ply Monte Carlo move selection.
//!
//! For every legal move the allocator runs simulations; the selector then
//! picks the candidate with the best record. Ties go to the candidate that
//! comes first in board scan order, so seeded searches are reproducible.

use std::sync::Arc;

use fastrand::Rng;
use tracing::debug;

use crate::allocator::{allocate, first_max_index, SimulationStats};
use crate::board::{Board, Color, Move, Point};
use crate::config::{AllocatorKind, EngineConfig};
use crate::coord::format_move;
use crate::error::ConfigError;
use crate::evaluator::PlayoutEvaluator;
use crate::patterns::PatternWeights;
use crate::policy::RolloutPolicy;

/// Candidates and their statistics from one search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best: Point,
    pub candidates: Vec<Point>,
    pub stats: Vec<SimulationStats>,
}

impl SearchResult {
    /// `(move, win rate)` for every candidate, in candidate order.
    pub fn win_rates(&self) -> Vec<(Point, f64)> {
        self.candidates
            .iter()
            .zip(&self.stats)
            .map(|(&pt, s)| (pt, s.win_rate()))
            .collect()
    }
}

/// Pick the final move: most wins under a fixed split, best win rate under
/// the bandit. Ties go to the lowest candidate index.
pub fn select_best(candidates: &[Point], stats: &[SimulationStats], kind: AllocatorKind) -> Point {
    debug_assert_eq!(candidates.len(), stats.len());
    let scores: Vec<f64> = match kind {
        AllocatorKind::FixedSplit => stats.iter().map(|s| s.wins as f64).collect(),
        AllocatorKind::Bandit => stats.iter().map(SimulationStats::win_rate).collect(),
    };
    candidates[first_max_index(&scores)]
}

/// The move-selection engine.
pub struct Engine {
    config: EngineConfig,
    weights: Arc<PatternWeights>,
    evaluator: PlayoutEvaluator,
    rng: Rng,
}

impl Engine {
    /// Create an engine. The weight table is only consulted by the
    /// pattern-weighted policy.
    pub fn new(config: EngineConfig, weights: Arc<PatternWeights>) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let evaluator = PlayoutEvaluator::new(
            RolloutPolicy::from_kind(config.policy, &weights),
            config.ply_limit,
        );
        Ok(Self {
            config,
            weights,
            evaluator,
            rng,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration. The RNG is reseeded only when the new
    /// config carries a different seed.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.seed != self.config.seed {
            if let Some(seed) = config.seed {
                self.rng = Rng::with_seed(seed);
            }
        }
        self.evaluator = PlayoutEvaluator::new(
            RolloutPolicy::from_kind(config.policy, &self.weights),
            config.ply_limit,
        );
        self.config = config;
        Ok(())
    }

    /// Best move for `color`, or `None` when it has no legal move.
    pub fn get_move(&mut self, board: &Board, color: Color) -> Option<Point> {
        self.search(board, color).map(|r| r.best)
    }

    /// Run a full decision and keep the per-candidate statistics.
    pub fn search(&mut self, board: &Board, color: Color) -> Option<SearchResult> {
        let candidates = board.legal_moves(color);
        debug!(
            candidates = candidates.len(),
            allocator = %self.config.allocator,
            policy = %self.config.policy,
            "starting search"
        );
        let stats = allocate(
            board,
            &candidates,
            color,
            &self.config,
            &self.evaluator,
            &mut self.rng,
        )?;
        let best = select_best(&candidates, &stats, self.config.allocator);

        let size = board.size();
        debug!(
            best = %format_move(Move::Play(best), size).unwrap_or_default(),
            "search finished"
        );
        Some(SearchResult {
            best,
            candidates,
            stats,
        })
    }

    /// The rollout policy's move distribution for `color`.
    pub fn policy_moves(&self, board: &Board, color: Color) -> Vec<(Point, f64)> {
        self.evaluator.policy().move_probabilities(board, color)
    }
}
