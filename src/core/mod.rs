//! Core race types: players, RNG, setup, and race state.
//!
//! This module holds the data the resolver reads and produces. It contains
//! no turn logic; see `rules` for that.

pub mod player;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use rng::{roll_die, GameRng, RandomSource, ScriptedSource, DIE_FACES};
pub use config::{
    CardRules, MomentumEffect, MomentumTable, RaceGoal, SetupError, SetupState, GOAL_DEFAULTS,
    MAX_COPIES_PER_CARD, MAX_PLAYERS, MIN_PLAYERS,
};
pub use state::{
    clamp_momentum, PendingStumble, RaceOutcome, RacePhase, RaceState, Roster, INITIAL_MOMENTUM,
    MOMENTUM_MAX, MOMENTUM_MIN,
};
