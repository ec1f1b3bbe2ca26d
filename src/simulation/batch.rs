//! Batch simulation and aggregate statistics.
//!
//! Games are independent, so a batch fans out across threads with `rayon`.
//! Each game gets its own forked [`GameRng`], derived sequentially from the
//! batch seed before the fan-out, so a batch is reproducible regardless of
//! scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{GameRng, PlayerId, PlayerMap, SetupState};

use super::driver::{simulate_game, SimulationResult};

/// Most games a single batch runs.
pub const MAX_BATCH_GAMES: usize = 200;

/// Score margin at or below which a finish counts as close.
pub const CLOSE_FINISH_MARGIN: i64 = 2;

/// Batch configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Games to run, within `1..=MAX_BATCH_GAMES`.
    pub games: usize,
    /// Seed the per-game RNGs are forked from.
    pub seed: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { games: 20, seed: 0 }
    }
}

impl BatchConfig {
    /// Create the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the game count, clamped into `1..=MAX_BATCH_GAMES`.
    #[must_use]
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games.clamp(1, MAX_BATCH_GAMES);
        self
    }

    /// Set the batch seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Run a batch of independent games in parallel.
///
/// Results are in game order and identical to running the same games
/// sequentially.
pub fn simulate_batch(setup: &SetupState, config: &BatchConfig) -> Vec<SimulationResult> {
    let games = config.games.clamp(1, MAX_BATCH_GAMES);
    let mut root = GameRng::new(config.seed);
    let rngs: Vec<GameRng> = (0..games).map(|_| root.fork()).collect();

    let results: Vec<SimulationResult> = rngs
        .into_par_iter()
        .map(|mut rng| simulate_game(setup, &mut rng))
        .collect();

    info!(games, seed = config.seed, "batch simulated");
    results
}

/// Aggregate statistics over a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Games aggregated.
    pub games: usize,
    /// Wins per player.
    pub win_counts: PlayerMap<u32>,
    /// Mean completed rounds per game.
    pub average_rounds: f64,
    /// Mean turns per game.
    pub average_turns: f64,
    /// Percentage of games whose top two scores were within
    /// [`CLOSE_FINISH_MARGIN`].
    pub close_rate: f64,
    /// Games decided by a shootout.
    pub shootout_games: usize,
    /// Games stopped at the turn cap without a winner.
    pub capped_games: usize,
}

impl BatchStats {
    /// Aggregate a batch. Returns `None` for an empty batch.
    #[must_use]
    pub fn from_results(player_count: usize, results: &[SimulationResult]) -> Option<Self> {
        if results.is_empty() || player_count == 0 {
            return None;
        }

        let mut win_counts = PlayerMap::with_value(player_count, 0u32);
        let mut total_rounds = 0u64;
        let mut total_turns = 0u64;
        let mut close_games = 0usize;
        let mut shootout_games = 0usize;
        let mut capped_games = 0usize;

        for result in results {
            match result.outcome() {
                Some(outcome) if outcome.winner.index() < player_count => {
                    win_counts[outcome.winner] += 1;
                    if outcome.decided_by_shootout {
                        shootout_games += 1;
                    }
                }
                Some(_) => {}
                None => {
                    if result.hit_turn_cap() {
                        capped_games += 1;
                    }
                }
            }
            total_rounds += u64::from(result.final_state.completed_rounds);
            total_turns += result.turns.len() as u64;
            if result.winning_margin() <= CLOSE_FINISH_MARGIN {
                close_games += 1;
            }
        }

        let games = results.len();
        let count = games as f64;
        Some(Self {
            games,
            win_counts,
            average_rounds: total_rounds as f64 / count,
            average_turns: total_turns as f64 / count,
            close_rate: close_games as f64 / count * 100.0,
            shootout_games,
            capped_games,
        })
    }

    /// Share of games a player won, as a percentage.
    #[must_use]
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        f64::from(self.win_counts[player]) / self.games as f64 * 100.0
    }
}
