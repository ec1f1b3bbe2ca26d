//! # dice-race
//!
//! A deterministic, turn-based dice race engine.
//!
//! Players take turns rolling a six-sided die. The roll adjusts the player's
//! momentum, and momentum is how far their score advances. One-shot cards
//! bend individual turns. A round count or target score ends the main race,
//! and tied leaders play a sudden-death shootout until one remains.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `resolve_turn` reads a state and returns a new
//!    one. No state is mutated in place, so every snapshot stays valid.
//!
//! 2. **Injected randomness**: the only source of chance is a
//!    [`RandomSource`] passed in by the caller. Seeded sources make every
//!    race bit-reproducible.
//!
//! 3. **Total configuration**: momentum effects are a fixed table over die
//!    faces and cards are an enum-keyed record, so lookups cannot miss.
//!
//! ## Example
//!
//! ```
//! use dice_race::core::{PlayerId, RaceState, ScriptedSource, SetupState};
//! use dice_race::rules::resolve_turn;
//!
//! let setup = SetupState::new().with_players(2);
//! let state = RaceState::new(setup).started();
//!
//! let next = resolve_turn(&state, 5, &mut ScriptedSource::default());
//! assert_eq!(next.scores[PlayerId::new(0)], 2);
//! assert_eq!(next.active_player, PlayerId::new(1));
//! ```
//!
//! ## Modules
//!
//! - `core`: players, RNG, setup, race state
//! - `cards`: card hands and the card-effect pipeline
//! - `rules`: the turn resolver
//! - `simulation`: single-game traces and parallel batches

pub mod core;
pub mod cards;
pub mod rules;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{
    roll_die, CardRules, GameRng, MomentumEffect, MomentumTable, PlayerId, PlayerMap, RaceGoal,
    RaceOutcome, RacePhase, RaceState, RandomSource, ScriptedSource, SetupError, SetupState,
};

pub use crate::cards::{CardHand, CardKind, CardPlay};

pub use crate::rules::{get_leaders, resolve_turn};

pub use crate::simulation::{
    simulate_batch, simulate_game, BatchConfig, BatchStats, SimulationResult, SimulationTurn,
};
