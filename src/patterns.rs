//! Local 3x3 patterns and their rollout weights.
//!
//! ## Pattern index
//! The 8 points around a candidate move are read row by row (center
//! skipped), each encoded as one base-4 digit:
//!
//! ```text
//! 5 6 7      0 = empty
//! 3 . 4      1 = stone of the side to move
//! 0 1 2      2 = opponent stone
//!            3 = off the board
//! ```
//!
//! Digit `i` is weighted by `4^i`, giving an index in `0..4^8`. Rows are
//! drawn bottom-up because row 1 has the lowest point indices.
//!
//! ## Weight table
//! Weights are read once from a line-oriented file: line `i` (1-based)
//! holds the weight of index `i - 1` as its second token. The table lives in
//! memory afterwards and is shared read-only between playouts.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::board::{Board, Color, Point};
use crate::constants::{
    DEFAULT_PATTERN_WEIGHT, DIGIT_BORDER, DIGIT_EMPTY, DIGIT_OPPONENT, DIGIT_OWN, PATTERN_COUNT,
};
use crate::error::WeightsError;

/// Pattern index of `pt` from the point of view of the side to move.
#[inline]
pub fn pattern_index(board: &Board, pt: Point) -> usize {
    pattern_index_for(board, pt, board.current_player())
}

/// Pattern index of `pt` from the point of view of `to_play`. Neighbors
/// outside the board count as border, so any `pt` yields an index.
pub fn pattern_index_for(board: &Board, pt: Point, to_play: Color) -> usize {
    let opp = to_play.opponent();
    board
        .neighbors8(pt)
        .iter()
        .rev()
        .fold(0, |acc, &n| acc * 4 + digit(board.get(n), to_play, opp))
}

#[inline]
fn digit(c: Color, own: Color, opp: Color) -> usize {
    if c == own {
        DIGIT_OWN
    } else if c == opp {
        DIGIT_OPPONENT
    } else if c == Color::Empty {
        DIGIT_EMPTY
    } else {
        DIGIT_BORDER
    }
}

/// Rollout weight for every pattern index.
#[derive(Debug, Clone)]
pub struct PatternWeights {
    weights: Vec<f64>,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self::uniform(DEFAULT_PATTERN_WEIGHT)
    }
}

impl PatternWeights {
    /// A table giving every pattern the same weight.
    pub fn uniform(weight: f64) -> Self {
        Self {
            weights: vec![weight; PATTERN_COUNT],
        }
    }

    /// Build a table from explicit weights. Missing trailing entries get the
    /// default weight.
    pub fn from_weights(mut weights: Vec<f64>) -> Result<Self, WeightsError> {
        if weights.len() > PATTERN_COUNT {
            return Err(WeightsError::TooManyEntries);
        }
        if let Some((i, &w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
        {
            return Err(WeightsError::NegativeWeight {
                line: i + 1,
                weight: w,
            });
        }
        weights.resize(PATTERN_COUNT, DEFAULT_PATTERN_WEIGHT);
        Ok(Self { weights })
    }

    /// Parse a weight table. Line `i` holds the weight for index `i - 1` as
    /// its second whitespace-separated token; blank lines keep the default.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, WeightsError> {
        let mut weights = vec![DEFAULT_PATTERN_WEIGHT; PATTERN_COUNT];
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            if i >= PATTERN_COUNT {
                return Err(WeightsError::TooManyEntries);
            }
            let token = line
                .split_whitespace()
                .nth(1)
                .ok_or(WeightsError::MissingWeight { line: lineno })?;
            let weight: f64 = token.parse().map_err(|_| WeightsError::BadWeight {
                line: lineno,
                token: token.to_string(),
            })?;
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(WeightsError::NegativeWeight {
                    line: lineno,
                    weight,
                });
            }
            weights[i] = weight;
        }
        Ok(Self { weights })
    }

    /// Load a weight table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WeightsError> {
        let path = path.as_ref();
        let table = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), "loaded pattern weights");
        Ok(table)
    }

    /// Weight for a pattern index.
    #[inline]
    pub fn weight(&self, index: usize) -> f64 {
        self.weights
            .get(index)
            .copied()
            .unwrap_or(DEFAULT_PATTERN_WEIGHT)
    }

    /// Weight of playing `pt` for `to_play`.
    #[inline]
    pub fn move_weight(&self, board: &Board, pt: Point, to_play: Color) -> f64 {
        self.weight(pattern_index_for(board, pt, to_play))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::coord_to_point;

    #[test]
    fn test_empty_surroundings_index_zero() {
        let board = Board::new(7).unwrap();
        let center = coord_to_point(4, 4, 7);
        assert_eq!(pattern_index(&board, center), 0);
    }

    #[test]
    fn test_corner_index_matches_across_sizes() {
        // Neighbors 0,1,2,3 and 5 are off the board.
        let expected = 3 * (1 + 4 + 16 + 64) + 3 * 4usize.pow(5);
        for size in [5, 7, 9, 19] {
            let board = Board::new(size).unwrap();
            let a1 = coord_to_point(1, 1, size);
            assert_eq!(pattern_index(&board, a1), expected, "size {size}");
        }
    }

    #[test]
    fn test_digit_order_and_perspective() {
        // Black stone directly above the center point (neighbor 6).
        let board = Board::from_diagram(
            "
            .....
            ..X..
            .....
            .....
            .....
            ",
        )
        .unwrap();
        let center = coord_to_point(3, 3, 5);
        assert_eq!(pattern_index_for(&board, center, Color::Black), 4usize.pow(6));
        assert_eq!(
            pattern_index_for(&board, center, Color::White),
            2 * 4usize.pow(6)
        );
    }

    #[test]
    fn test_index_in_range() {
        let board = Board::from_diagram(
            "
            XO.
            OXO
            .OX
            ",
        )
        .unwrap();
        for pt in board.points() {
            assert!(pattern_index(&board, pt) < PATTERN_COUNT);
        }
    }

    #[test]
    fn test_points_off_the_array() {
        let board = Board::new(5).unwrap();
        // Only the SE neighbor of point 0 (A1) is on the board.
        assert_eq!(pattern_index_for(&board, 0, Color::Black), 4usize.pow(7) - 1);
        assert_eq!(pattern_index_for(&board, 10_000, Color::Black), PATTERN_COUNT - 1);
    }

    #[test]
    fn test_from_reader() {
        let text = "0 0.5\n1 2.0\n\n3 4\n";
        let table = PatternWeights::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.weight(0), 0.5);
        assert_eq!(table.weight(1), 2.0);
        assert_eq!(table.weight(2), DEFAULT_PATTERN_WEIGHT);
        assert_eq!(table.weight(3), 4.0);
        assert_eq!(table.weight(PATTERN_COUNT - 1), DEFAULT_PATTERN_WEIGHT);
    }

    #[test]
    fn test_from_reader_errors() {
        assert!(matches!(
            PatternWeights::from_reader("0\n".as_bytes()),
            Err(WeightsError::MissingWeight { line: 1 })
        ));
        assert!(matches!(
            PatternWeights::from_reader("0 1\n1 abc\n".as_bytes()),
            Err(WeightsError::BadWeight { line: 2, .. })
        ));
        assert!(matches!(
            PatternWeights::from_reader("0 -1\n".as_bytes()),
            Err(WeightsError::NegativeWeight { line: 1, .. })
        ));
        let too_long = "x 1\n".repeat(PATTERN_COUNT + 1);
        assert!(matches!(
            PatternWeights::from_reader(too_long.as_bytes()),
            Err(WeightsError::TooManyEntries)
        ));
    }

    #[test]
    fn test_from_weights() {
        let table = PatternWeights::from_weights(vec![0.0, 3.0]).unwrap();
        assert_eq!(table.weight(0), 0.0);
        assert_eq!(table.weight(1), 3.0);
        assert_eq!(table.weight(2), DEFAULT_PATTERN_WEIGHT);
        assert!(PatternWeights::from_weights(vec![f64::INFINITY]).is_err());
    }
}
