//! Race state: one immutable snapshot per resolved turn.
//!
//! ## RaceState
//!
//! Everything observable about a race in progress:
//! - Scores, momentum, remaining cards per player
//! - Round bookkeeping and the sticky length-goal trigger
//! - The shootout roster while a tie is being broken
//! - Deferred effects waiting for a player's next turn
//! - The last turn's roll, move and card label
//!
//! The resolver never mutates a state it was given. Each call returns a new
//! snapshot, so every earlier state stays valid. Pending stumble queues use
//! `im` persistent vectors so snapshots share structure.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::SetupState;
use super::player::{PlayerId, PlayerMap};
use crate::cards::CardHand;

/// Lowest momentum a player can hold.
pub const MOMENTUM_MIN: i64 = 0;

/// Highest momentum a player can hold.
pub const MOMENTUM_MAX: i64 = 5;

/// Momentum every player starts with.
pub const INITIAL_MOMENTUM: i64 = 1;

/// Clamp a momentum value into `[MOMENTUM_MIN, MOMENTUM_MAX]`.
#[must_use]
pub fn clamp_momentum(value: i64) -> i64 {
    value.clamp(MOMENTUM_MIN, MOMENTUM_MAX)
}

/// Tie-break roster. Inline for typical player counts.
pub type Roster = SmallVec<[PlayerId; 8]>;

/// A stumble waiting to land on its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingStumble {
    /// Momentum removed when it lands.
    pub amount: i64,
    /// Earliest value of `completed_rounds` at which it lands.
    pub trigger_round: u32,
}

/// Coarse race phase, derived from the state fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RacePhase {
    /// Created but not started.
    NotStarted,
    /// Main race.
    Racing,
    /// Sudden-death shootout between tied leaders.
    TieBreak,
    /// A winner has been declared.
    Finished,
}

/// Result of a finished race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaceOutcome {
    /// The sole winner.
    pub winner: PlayerId,
    /// Rounds completed when the race ended.
    pub completed_rounds: u32,
    /// Whether the winner came out of a shootout.
    pub decided_by_shootout: bool,
}

/// Complete race state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceState {
    /// Configuration this race was created from.
    pub setup: SetupState,

    // === Turn Order ===
    /// Player whose turn resolves next.
    pub active_player: PlayerId,

    /// Fully played rounds, across the main race and any shootout.
    pub completed_rounds: u32,

    /// Turns played in the current phase's round.
    pub shootout_turns_played: u32,

    /// Tied leaders still in the shootout. `None` during the main race.
    pub shootout_players: Option<Roster>,

    // === Progress ===
    /// Score per player.
    pub scores: PlayerMap<i64>,

    /// Momentum per player, always within `[MOMENTUM_MIN, MOMENTUM_MAX]`.
    pub momentum: PlayerMap<i64>,

    /// Length goal: sticky, set once any score reached the goal.
    /// Rounds goal: set on every resolved turn.
    pub finish_triggered: bool,

    /// Whether turns are being resolved.
    pub in_progress: bool,

    /// The declared winner.
    pub winner: Option<PlayerId>,

    /// Shootout rounds played before the winner emerged.
    pub shootout_rounds: u32,

    // === Cards ===
    /// Remaining card copies per player.
    pub player_cards: PlayerMap<CardHand>,

    /// Stumbles queued against each player.
    pub pending_stumbles: PlayerMap<Vector<PendingStumble>>,

    /// Momentum banked by deep breath, applied at the player's next turn.
    pub pending_deep_breath_boost: PlayerMap<i64>,

    // === Last Turn ===
    /// Die roll of the last turn, before any re-roll.
    pub last_roll: Option<u8>,

    /// Score gained on the last turn.
    pub last_move: Option<i64>,

    /// Cards played on the last turn, comma separated.
    pub last_card_played: Option<String>,
}

impl RaceState {
    /// Create a fresh, not yet started race from a setup.
    ///
    /// Scores start at 0, momentum at [`INITIAL_MOMENTUM`], and every player
    /// holds `copies_per_card` of each card.
    #[must_use]
    pub fn new(setup: SetupState) -> Self {
        let players = setup.players;
        let hand = CardHand::full(setup.card_rules.copies_per_card);

        Self {
            active_player: PlayerId::new(0),
            completed_rounds: 0,
            shootout_turns_played: 0,
            shootout_players: None,
            scores: PlayerMap::with_value(players, 0),
            momentum: PlayerMap::with_value(players, INITIAL_MOMENTUM),
            finish_triggered: false,
            in_progress: false,
            winner: None,
            shootout_rounds: 0,
            player_cards: PlayerMap::with_value(players, hand),
            pending_stumbles: PlayerMap::with_default(players),
            pending_deep_breath_boost: PlayerMap::with_value(players, 0),
            last_roll: None,
            last_move: None,
            last_card_played: None,
            setup,
        }
    }

    /// Start the race. A finished race stays finished.
    #[must_use]
    pub fn started(mut self) -> Self {
        if self.winner.is_none() {
            self.in_progress = true;
        }
        self
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.setup.players
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RacePhase {
        match (self.winner, self.in_progress, &self.shootout_players) {
            (Some(_), _, _) => RacePhase::Finished,
            (None, false, _) => RacePhase::NotStarted,
            (None, true, Some(_)) => RacePhase::TieBreak,
            (None, true, None) => RacePhase::Racing,
        }
    }

    /// Whether a winner has been declared.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Players eligible to act in the current phase, in turn order.
    #[must_use]
    pub fn roster(&self) -> Roster {
        match &self.shootout_players {
            Some(players) => players.clone(),
            None => PlayerId::all(self.player_count()).collect(),
        }
    }

    /// Players tied for the highest score.
    #[must_use]
    pub fn leaders(&self) -> Vec<PlayerId> {
        crate::rules::get_leaders(self.scores.as_slice())
    }

    /// Result of the race, once it has a winner.
    #[must_use]
    pub fn outcome(&self) -> Option<RaceOutcome> {
        self.winner.map(|winner| RaceOutcome {
            winner,
            completed_rounds: self.completed_rounds,
            decided_by_shootout: self.shootout_rounds > 0,
        })
    }

    /// Total momentum still queued against a player by stumbles.
    #[must_use]
    pub fn pending_stumble_total(&self, player: PlayerId) -> i64 {
        self.pending_stumbles[player].iter().map(|s| s.amount).sum()
    }
}
