//! Single-game simulation driver.
//!
//! Replays the turn resolver with dice drawn from a [`RandomSource`] until
//! the race has a winner or the safety cap is hit, recording every turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{roll_die, GameRng, PlayerId, RaceOutcome, RaceState, RandomSource, SetupState};
use crate::rules::{get_leaders, resolve_turn};

/// Hard cap on turns per simulated game.
///
/// Guards against setups that can never finish; not a game rule.
pub const MAX_SIMULATION_TURNS: usize = 2000;

/// One resolved turn in a simulation trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationTurn {
    /// Turn number (starts at 1).
    pub turn: usize,
    /// Player who acted.
    pub player: PlayerId,
    /// Roll drawn for the turn.
    pub roll: u8,
    /// Player's momentum before the turn, before deferred effects.
    pub momentum_before: i64,
    /// Player's momentum after the turn.
    pub momentum_after: i64,
    /// Score gained.
    pub movement: i64,
    /// Cards played, if any.
    pub card_played: Option<String>,
    /// All scores after the turn.
    pub scores_after_turn: Vec<i64>,
}

/// A finished (or capped) simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// State after the last turn.
    pub final_state: RaceState,
    /// Every turn in order.
    pub turns: Vec<SimulationTurn>,
}

impl SimulationResult {
    /// The race result, or `None` if the turn cap was hit first.
    #[must_use]
    pub fn outcome(&self) -> Option<RaceOutcome> {
        self.final_state.outcome()
    }

    /// Whether the game stopped at the turn cap without a winner.
    #[must_use]
    pub fn hit_turn_cap(&self) -> bool {
        self.final_state.winner.is_none() && self.turns.len() >= MAX_SIMULATION_TURNS
    }

    /// Gap between the top two scores.
    #[must_use]
    pub fn winning_margin(&self) -> i64 {
        let mut scores = self.final_state.scores.as_slice().to_vec();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        let first = scores.first().copied().unwrap_or(0);
        let second = scores.get(1).copied().unwrap_or(0);
        first - second
    }

    /// One-line summary: winner or tied leaders, turn and round counts.
    #[must_use]
    pub fn summary(&self) -> String {
        let leaders = get_leaders(self.final_state.scores.as_slice());
        let leader_text = match (self.final_state.winner, leaders.as_slice()) {
            (Some(winner), _) | (None, &[winner]) => format!("Winner: {winner}"),
            (None, tied) => {
                let names: Vec<String> = tied.iter().map(|p| (p.index() + 1).to_string()).collect();
                format!("Draw leaders: {}", names.join(", "))
            }
        };
        format!(
            "{leader_text} · turns {} · rounds {}",
            self.turns.len(),
            self.final_state.completed_rounds
        )
    }
}

/// Simulate one race from a fresh, started state.
///
/// `rng` supplies both the dice and any second chance re-rolls.
pub fn simulate_game<R: RandomSource>(setup: &SetupState, rng: &mut R) -> SimulationResult {
    let mut state = RaceState::new(setup.clone()).started();
    let mut turns = Vec::new();

    while state.in_progress && turns.len() < MAX_SIMULATION_TURNS {
        let player = state.active_player;
        let momentum_before = state.momentum[player];
        let roll = roll_die(rng.next_sample());
        state = resolve_turn(&state, roll, rng);

        turns.push(SimulationTurn {
            turn: turns.len() + 1,
            player,
            roll,
            momentum_before,
            momentum_after: state.momentum[player],
            movement: state.last_move.unwrap_or(0),
            card_played: state.last_card_played.clone(),
            scores_after_turn: state.scores.as_slice().to_vec(),
        });
    }

    if state.winner.is_none() {
        warn!(turns = turns.len(), "simulation stopped at turn cap without a winner");
    } else {
        debug!(turns = turns.len(), winner = ?state.winner, "simulation finished");
    }

    SimulationResult {
        final_state: state,
        turns,
    }
}

/// Simulate one race with a seeded RNG.
pub fn simulate_seeded(setup: &SetupState, seed: u64) -> SimulationResult {
    simulate_game(setup, &mut GameRng::new(seed))
}
