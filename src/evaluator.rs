//! Per-move evaluation by repeated playouts.

use fastrand::Rng;
use tracing::warn;

use crate::board::{Board, Color, Move, Point};
use crate::playout::playout;
use crate::policy::RolloutPolicy;

/// Scores one candidate move by simulation.
///
/// Implementations must be `Sync` so the fixed-split allocator can evaluate
/// candidates on several threads.
pub trait MoveEvaluator: Sync {
    /// Number of wins for `to_play` over `sims` simulations after `to_play`
    /// plays `mv` on `board`. The result lies in `0..=sims`.
    fn evaluate(&self, board: &Board, mv: Point, to_play: Color, sims: u32, rng: &mut Rng) -> u32;
}

/// Evaluator backed by real playouts.
#[derive(Debug, Clone)]
pub struct PlayoutEvaluator {
    policy: RolloutPolicy,
    ply_limit: usize,
}

impl PlayoutEvaluator {
    pub fn new(policy: RolloutPolicy, ply_limit: usize) -> Self {
        Self { policy, ply_limit }
    }

    pub fn policy(&self) -> &RolloutPolicy {
        &self.policy
    }
}

impl MoveEvaluator for PlayoutEvaluator {
    fn evaluate(&self, board: &Board, mv: Point, to_play: Color, sims: u32, rng: &mut Rng) -> u32 {
        // An illegal move loses on the spot.
        let after = match board.apply(Move::Play(mv), to_play) {
            Ok(b) => b,
            Err(e) => {
                warn!(point = mv, error = %e, "evaluating illegal candidate");
                return 0;
            }
        };
        let opp = to_play.opponent();

        let mut wins = 0;
        for _ in 0..sims {
            let mut sim = after.clone();
            let result = playout(&mut sim, opp, &self.policy, self.ply_limit, rng);
            if result.winner == to_play {
                wins += 1;
            }
        }
        wins
    }
}
