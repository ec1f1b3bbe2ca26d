//! Simulation: replaying the resolver end-to-end.
//!
//! - `simulate_game`: one race to completion with a full turn trace
//! - `simulate_batch`: many independent races in parallel
//! - `BatchStats`: win counts, lengths and close-finish rate over a batch

mod batch;
mod driver;

pub use batch::{simulate_batch, BatchConfig, BatchStats, CLOSE_FINISH_MARGIN, MAX_BATCH_GAMES};
pub use driver::{
    simulate_game, simulate_seeded, SimulationResult, SimulationTurn, MAX_SIMULATION_TURNS,
};
