//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, state machine and timing of the falling
//! block simulation. It has no dependencies on UI or I/O; time is passed in
//! as [`std::time::Instant`] values so tests can drive it exactly.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven tetromino variants, their bitmaps, spacing and spawn data
//! - [`board`]: 10x22 grid (2 hidden buffer rows) with placement checks and line clearing
//! - [`rotation`]: rotation with a one-shot shift back inside the grid
//! - [`cycle`]: gravity cycle accumulator
//! - [`scoring`]: line clear points, speed and level progression
//! - [`rng`]: uniform piece draws from a seeded LCG
//! - [`game_state`]: the session state machine
//! - [`snapshot`]: read-only views for renderers
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly and independently (no bag)
//! - A piece that cannot descend locks on the same gravity cycle (no lock delay)
//! - Clearing n lines pays `50 << n`; every lock speeds gravity up by 0.035 cycles/s
//! - Soft drop raises gravity to 25 cycles/s and is refused for 25 frames after a lock
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use blockfall_core::GameState;
//! use blockfall_core::types::{Command, Phase};
//!
//! let t0 = Instant::now();
//! let mut game = GameState::new(12345, t0);
//! assert!(game.apply_command(Command::Start, t0));
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! let row = game.active().unwrap().row;
//! game.frame(t0 + Duration::from_millis(1_020));
//! assert_eq!(game.active().unwrap().row, row + 1);
//! ```

pub mod board;
pub mod cycle;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use cycle::CycleTimer;
pub use game_state::{ActivePiece, GameState, LockEvent, TickOutcome};
pub use pieces::{get_shape, piece_def, spacing, spawn_position, PieceDef, PieceShape, Spacing};
pub use rng::SimpleRng;
pub use rotation::resolve_rotation;
pub use scoring::{level_for_speed, line_clear_score, next_speed};
pub use snapshot::{ActiveSnapshot, BoardGrid, GameSnapshot};
