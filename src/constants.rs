//! Constants for board geometry, engine defaults, and pattern encoding.
//!
//! The board uses a 1D array representation with one column of padding per
//! row and padding rows above and below, so every on-board point has eight
//! addressable neighbors.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size used when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 7;

/// Smallest supported board.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board (limited by the 25 column letters, `I` skipped).
pub const MAX_BOARD_SIZE: usize = 25;

/// Column letters in GTP order. There is no `I` column.
pub const COLUMN_LETTERS: &[u8; MAX_BOARD_SIZE] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Engine Parameters
// =============================================================================

/// Default number of simulations per candidate move.
pub const DEFAULT_NUM_SIM: u32 = 100;

/// Default maximum number of plies in one playout.
pub const DEFAULT_PLY_LIMIT: usize = 100;

/// Default UCB exploration constant. Smaller than sqrt(2), so the bandit
/// leans towards exploitation.
pub const DEFAULT_EXPLORATION: f64 = 0.4;

/// Consecutive passes that end a playout.
pub const PASSES_TO_END: u32 = 2;

// =============================================================================
// Pattern Encoding
// =============================================================================

/// Number of neighbors in a pattern (3x3 block without its center).
pub const PATTERN_NEIGHBORS: usize = 8;

/// Number of distinct pattern indices (4^8).
pub const PATTERN_COUNT: usize = 1 << (2 * PATTERN_NEIGHBORS);

/// Weight for pattern indices the weight table does not list.
pub const DEFAULT_PATTERN_WEIGHT: f64 = 1.0;

/// Pattern digit for an empty neighbor.
pub const DIGIT_EMPTY: usize = 0;

/// Pattern digit for a stone of the side to move.
pub const DIGIT_OWN: usize = 1;

/// Pattern digit for an opponent stone.
pub const DIGIT_OPPONENT: usize = 2;

/// Pattern digit for a point off the board.
pub const DIGIT_BORDER: usize = 3;
