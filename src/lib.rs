//! nogo-mc: a one-ply Monte Carlo move engine for NoGo.
//!
//! Every legal move is scored by random playouts from the position it
//! leads to; the move with the best record is played. Playouts follow a
//! uniform or a 3x3-pattern-weighted rollout policy, and the simulation
//! budget is split either evenly or by a UCB1 bandit.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits and engine defaults
//! - [`error`] - Error types
//! - [`board`] - Board representation and NoGo move legality
//! - [`coord`] - Move text such as `C4` or `pass`
//! - [`config`] - Engine configuration
//! - [`patterns`] - 3x3 pattern indexing and weight tables
//! - [`policy`] - Rollout policies
//! - [`playout`] - Random game simulation
//! - [`evaluator`] - Per-move evaluation by playouts
//! - [`allocator`] - Spreading the simulation budget over candidates
//! - [`search`] - Move selection
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use nogo_mc::board::{Board, Color};
//! use nogo_mc::config::EngineConfig;
//! use nogo_mc::coord::parse_move;
//! use nogo_mc::patterns::PatternWeights;
//! use nogo_mc::search::Engine;
//!
//! let mut board = Board::new(7).unwrap();
//! board.play(parse_move("D4", 7).unwrap(), Color::Black).unwrap();
//!
//! let config = EngineConfig::default().with_simulations(10).with_seed(7);
//! let mut engine = Engine::new(config, Arc::new(PatternWeights::default())).unwrap();
//! let reply = engine.get_move(&board, Color::White).unwrap();
//! assert!(board.is_legal(reply, Color::White));
//! ```

pub mod allocator;
pub mod board;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod evaluator;
pub mod gtp;
pub mod patterns;
pub mod playout;
pub mod policy;
pub mod search;
