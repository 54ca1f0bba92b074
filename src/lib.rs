//! A heuristic agent for playing the board game 'Connect 4'
//!
//! This agent uses a bitboard position encoding, bit-parallel threat
//! detection and a depth-bounded alpha-beta game tree search to pick
//! a column for the side to move.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{engine::Engine, bitboard::Position};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let engine = Engine::new();
//! let column = engine.play(Position::new())?;
//!
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod bitboard;

pub mod threat;

pub mod eval;

pub mod forced;

pub mod search;

pub mod engine;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// ensure that the given dimensions fit in a u64 for the bitboard representation
const_assert!(WIDTH * (HEIGHT + 1) < 64);
