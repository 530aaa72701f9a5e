//! Spreading the simulation budget over candidate moves.
//!
//! - **Fixed split**: every candidate gets `num_sim` simulations. Candidates
//!   are independent, so they run on the rayon pool; each one gets an RNG
//!   seeded from the caller's in candidate order, which keeps seeded
//!   searches reproducible.
//! - **Bandit**: UCB1 over `candidates * num_sim` single simulations. Each
//!   round depends on all earlier ones, so this runs sequentially.

use fastrand::Rng;
use rayon::prelude::*;
use tracing::trace;

use crate::board::{Board, Color, Point};
use crate::config::{AllocatorKind, EngineConfig};
use crate::evaluator::MoveEvaluator;

/// Visit and win counts for one candidate move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub visits: u32,
    pub wins: u32,
}

impl SimulationStats {
    /// Fold in `wins` out of `visits` new simulations.
    #[inline]
    pub fn record(&mut self, wins: u32, visits: u32) {
        debug_assert!(wins <= visits);
        self.visits += visits;
        self.wins += wins;
    }

    /// Observed win rate; 0 for an unvisited candidate.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }

    /// UCB1 score given the total number of visits across all candidates.
    #[inline]
    pub fn ucb(&self, c: f64, total_visits: u64) -> f64 {
        self.win_rate() + c * ((total_visits as f64).ln() / self.visits as f64).sqrt()
    }
}

/// Run the configured allocator. Returns `None` when there are no candidates.
pub fn allocate<E: MoveEvaluator + ?Sized>(
    board: &Board,
    candidates: &[Point],
    to_play: Color,
    config: &EngineConfig,
    evaluator: &E,
    rng: &mut Rng,
) -> Option<Vec<SimulationStats>> {
    if candidates.is_empty() {
        return None;
    }
    let stats = match config.allocator {
        AllocatorKind::FixedSplit => {
            fixed_split(board, candidates, to_play, config.num_sim, evaluator, rng)
        }
        AllocatorKind::Bandit => bandit(
            board,
            candidates,
            to_play,
            config.num_sim,
            config.exploration,
            evaluator,
            rng,
        ),
    };
    Some(stats)
}

/// Give every candidate exactly `num_sim` simulations.
pub fn fixed_split<E: MoveEvaluator + ?Sized>(
    board: &Board,
    candidates: &[Point],
    to_play: Color,
    num_sim: u32,
    evaluator: &E,
    rng: &mut Rng,
) -> Vec<SimulationStats> {
    let rngs: Vec<Rng> = candidates.iter().map(|_| Rng::with_seed(rng.u64(..))).collect();
    candidates
        .par_iter()
        .zip(rngs)
        .map(|(&mv, mut rng)| SimulationStats {
            visits: num_sim,
            wins: evaluator.evaluate(board, mv, to_play, num_sim, &mut rng),
        })
        .collect()
}

/// UCB1 allocation of `candidates.len() * num_sim` simulations.
pub fn bandit<E: MoveEvaluator + ?Sized>(
    board: &Board,
    candidates: &[Point],
    to_play: Color,
    num_sim: u32,
    c: f64,
    evaluator: &E,
    rng: &mut Rng,
) -> Vec<SimulationStats> {
    let mut stats = vec![SimulationStats::default(); candidates.len()];
    let budget = candidates.len() as u64 * num_sim as u64;

    for total in 0..budget {
        let arm = next_arm(&stats, c, total);
        let wins = evaluator.evaluate(board, candidates[arm], to_play, 1, rng);
        stats[arm].record(wins, 1);
        trace!(round = total, arm, wins, "bandit pull");
    }
    stats
}

/// Index of the candidate to simulate next: the first unvisited one, else
/// the highest UCB score with ties going to the lowest index.
pub fn next_arm(stats: &[SimulationStats], c: f64, total_visits: u64) -> usize {
    if let Some(i) = stats.iter().position(|s| s.visits == 0) {
        return i;
    }
    let scores: Vec<f64> = stats.iter().map(|s| s.ucb(c, total_visits)).collect();
    first_max_index(&scores)
}

/// Index of the first maximal value. Incomparable values (NaN) never win.
pub fn first_max_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Evaluator with a fixed win probability per move.
    struct Bernoulli(HashMap<Point, f64>);

    impl MoveEvaluator for Bernoulli {
        fn evaluate(&self, _: &Board, mv: Point, _: Color, sims: u32, rng: &mut Rng) -> u32 {
            let p = self.0[&mv];
            (0..sims).filter(|_| rng.f64() < p).count() as u32
        }
    }

    fn setup(rates: &[f64]) -> (Board, Vec<Point>, Bernoulli) {
        let board = Board::new(5).unwrap();
        let candidates: Vec<Point> = board.points().take(rates.len()).collect();
        let eval = Bernoulli(candidates.iter().copied().zip(rates.iter().copied()).collect());
        (board, candidates, eval)
    }

    #[test]
    fn test_empty_candidates() {
        let (board, _, eval) = setup(&[]);
        let mut rng = Rng::with_seed(1);
        let config = EngineConfig::default();
        assert!(allocate(&board, &[], Color::Black, &config, &eval, &mut rng).is_none());
    }

    #[test]
    fn test_fixed_split_counts() {
        let (board, candidates, eval) = setup(&[1.0, 0.0, 0.5]);
        let mut rng = Rng::with_seed(2);
        let stats = fixed_split(&board, &candidates, Color::Black, 40, &eval, &mut rng);
        assert_eq!(stats.len(), 3);
        assert!(stats.iter().all(|s| s.visits == 40 && s.wins <= s.visits));
        assert_eq!(stats[0].wins, 40);
        assert_eq!(stats[1].wins, 0);
    }

    #[test]
    fn test_fixed_split_reproducible() {
        let (board, candidates, eval) = setup(&[0.3, 0.6, 0.5, 0.4]);
        let a = fixed_split(&board, &candidates, Color::Black, 50, &eval, &mut Rng::with_seed(3));
        let b = fixed_split(&board, &candidates, Color::Black, 50, &eval, &mut Rng::with_seed(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_bandit_spends_exact_budget() {
        let (board, candidates, eval) = setup(&[0.2, 0.7, 0.4]);
        let mut rng = Rng::with_seed(4);
        let stats = bandit(&board, &candidates, Color::Black, 30, 0.4, &eval, &mut rng);
        let total: u32 = stats.iter().map(|s| s.visits).sum();
        assert_eq!(total, 90);
        assert!(stats.iter().all(|s| s.visits >= 1 && s.wins <= s.visits));
    }

    #[test]
    fn test_bandit_favours_best_arm() {
        let (board, candidates, eval) = setup(&[0.9, 0.5, 0.1]);
        let mut rng = Rng::with_seed(5);
        let stats = bandit(&board, &candidates, Color::Black, 1000, 0.4, &eval, &mut rng);
        assert!(stats[0].visits > 1500, "{stats:?}");
        assert!(stats[0].visits > stats[1].visits + stats[2].visits);
    }

    #[test]
    fn test_next_arm_visits_unexplored_first() {
        let stats = [
            SimulationStats { visits: 3, wins: 3 },
            SimulationStats { visits: 0, wins: 0 },
            SimulationStats { visits: 0, wins: 0 },
        ];
        assert_eq!(next_arm(&stats, 0.4, 3), 1);
    }

    #[test]
    fn test_next_arm_ties_to_lowest() {
        let stats = [SimulationStats { visits: 2, wins: 1 }; 3];
        assert_eq!(next_arm(&stats, 0.4, 6), 0);
    }

    #[test]
    fn test_next_arm_explores_rarely_visited() {
        let stats = [
            SimulationStats { visits: 100, wins: 60 },
            SimulationStats { visits: 1, wins: 0 },
        ];
        // 0.6 + small bonus loses to 0 + 1.0 * sqrt(ln 101)
        assert_eq!(next_arm(&stats, 1.0, 101), 1);
        assert_eq!(next_arm(&stats, 0.1, 101), 0);
    }

    #[test]
    fn test_first_max_index() {
        assert_eq!(first_max_index(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(first_max_index(&[5.0]), 0);
        assert_eq!(first_max_index(&[f64::NAN, 1.0]), 1);
        assert_eq!(first_max_index(&[0.0, 0.0]), 0);
    }

    #[test]
    fn test_ucb_total_beyond_u32() {
        let s = SimulationStats { visits: 10, wins: 5 };
        let at_max = s.ucb(0.4, u32::MAX as u64);
        let beyond = s.ucb(0.4, u32::MAX as u64 + 1_000_000);
        assert!(beyond > at_max);

        let stats = [
            SimulationStats { visits: 1, wins: 0 },
            SimulationStats { visits: 4_000_000_000, wins: 2_000_000_000 },
        ];
        // ln(2^33) / 1 keeps the rarely visited arm ahead.
        assert_eq!(next_arm(&stats, 0.4, 1 << 33), 0);
    }
}
