//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values and
//! batches them per frame. Soft drop is tracked as a held key, with a timeout
//! for terminals that never report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{CommandBatch, InputHandler};
pub use map::{is_soft_drop_key, map_key_press, should_quit};
