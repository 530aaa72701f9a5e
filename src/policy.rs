//! Rollout policies: how a single playout ply picks its move.

use std::sync::Arc;

use fastrand::Rng;

use crate::board::{Board, Color, Move, Point};
use crate::config::PolicyKind;
use crate::patterns::PatternWeights;

/// Move chooser used inside playouts.
#[derive(Debug, Clone)]
pub enum RolloutPolicy {
    /// Uniformly random legal move.
    Uniform,
    /// Legal moves sampled in proportion to their pattern weight.
    PatternWeighted(Arc<PatternWeights>),
}

impl RolloutPolicy {
    pub fn from_kind(kind: PolicyKind, weights: &Arc<PatternWeights>) -> Self {
        match kind {
            PolicyKind::Random => RolloutPolicy::Uniform,
            PolicyKind::PatternWeighted => RolloutPolicy::PatternWeighted(Arc::clone(weights)),
        }
    }

    /// Pick a move for `color`, or `Pass` when it has no legal move.
    pub fn choose(&self, board: &Board, color: Color, rng: &mut Rng) -> Move {
        let moves = board.legal_moves(color);
        if moves.is_empty() {
            return Move::Pass;
        }
        let idx = match self {
            RolloutPolicy::Uniform => rng.usize(..moves.len()),
            RolloutPolicy::PatternWeighted(table) => {
                let weights: Vec<f64> = moves
                    .iter()
                    .map(|&pt| table.move_weight(board, pt, color))
                    .collect();
                sample_weighted(&weights, rng).unwrap_or_else(|| rng.usize(..moves.len()))
            }
        };
        Move::Play(moves[idx])
    }

    /// The distribution [`RolloutPolicy::choose`] samples from, in legal-move
    /// order. Empty when `color` has no legal move.
    pub fn move_probabilities(&self, board: &Board, color: Color) -> Vec<(Point, f64)> {
        let moves = board.legal_moves(color);
        let weights: Vec<f64> = match self {
            RolloutPolicy::Uniform => vec![1.0; moves.len()],
            RolloutPolicy::PatternWeighted(table) => moves
                .iter()
                .map(|&pt| table.move_weight(board, pt, color))
                .collect(),
        };
        let total: f64 = weights.iter().sum();
        let uniform = 1.0 / moves.len() as f64;
        moves
            .into_iter()
            .zip(weights)
            .map(|(pt, w)| {
                if total > 0.0 && total.is_finite() {
                    (pt, w / total)
                } else {
                    (pt, uniform)
                }
            })
            .collect()
    }
}

/// Sample an index in proportion to `weights`. `None` when the weights do
/// not form a distribution (zero or non-finite sum).
fn sample_weighted(weights: &[f64], rng: &mut Rng) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }
    let r = rng.f64() * total;
    let mut acc = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        acc += w;
        if r < acc {
            return Some(i);
        }
    }
    // Rounding can leave `r` just above the last partial sum.
    weights.iter().rposition(|&w| w > 0.0)
}
