//! Monte Carlo playouts (random game simulation).
//!
//! A playout applies the rollout policy until both sides pass in a row or
//! the ply limit is hit. A policy only passes when the side to move has no
//! legal move, so a pass and "no legal move" are the same terminal signal.
//! The side to move in the final position is the one left without a move,
//! and the other side wins.

use fastrand::Rng;

use crate::board::{Board, Color, Move};
use crate::constants::PASSES_TO_END;
use crate::policy::RolloutPolicy;

/// Outcome of a single playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutResult {
    pub winner: Color,
    /// Plies played, passes included.
    pub plies: usize,
}

/// Play `board` out with `policy`. `start` is the side to move in `board`.
pub fn playout(
    board: &mut Board,
    start: Color,
    policy: &RolloutPolicy,
    limit: usize,
    rng: &mut Rng,
) -> PlayoutResult {
    debug_assert_eq!(board.current_player(), start);
    let mut passes = 0;
    let mut plies = 0;

    while plies < limit {
        let color = board.current_player();
        match policy.choose(board, color, rng) {
            Move::Play(pt) => {
                board.place(pt, color);
                passes = 0;
            }
            Move::Pass => {
                board.pass();
                passes += 1;
            }
        }
        plies += 1;
        if passes >= PASSES_TO_END {
            break;
        }
    }

    PlayoutResult {
        winner: winner(board),
        plies,
    }
}

/// The side that did not run out of moves.
#[inline]
pub fn winner(board: &Board) -> Color {
    board.current_player().opponent()
}
