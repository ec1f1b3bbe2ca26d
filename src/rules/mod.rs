//! Turn resolution for the dice race.
//!
//! `resolve_turn` is a pure state transition: it reads one snapshot and a
//! die roll and returns the next snapshot. The simulator and any UI drive
//! the race only through it.

pub mod engine;

pub use engine::{get_leaders, resolve_rolls, resolve_turn};
