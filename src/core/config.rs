//! Race setup: the immutable configuration a race is created from.
//!
//! - `RaceGoal`: what ends the main race (a round count or a target score)
//! - `MomentumTable`: per-face momentum deltas, total over faces 1-6
//! - `CardRules`: starting copies and strength of each card
//! - `SetupState`: combines all of the above with the player count
//!
//! The resolver never validates a setup. Layers that author setups call
//! [`SetupState::validate`] before creating a race.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rng::DIE_FACES;

/// Fewest players a race supports.
pub const MIN_PLAYERS: usize = 2;

/// Most players a race supports.
pub const MAX_PLAYERS: usize = 8;

/// Most starting copies of each card a player may hold.
pub const MAX_COPIES_PER_CARD: u8 = 2;

/// What ends the main race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaceGoal {
    /// Finish after `goal_value` completed rounds.
    Rounds,
    /// Finish at the end of the round in which any score reached `goal_value`.
    Length,
}

impl RaceGoal {
    /// Default goal value for this goal type.
    #[must_use]
    pub const fn default_value(self) -> u32 {
        match self {
            RaceGoal::Rounds => GOAL_DEFAULTS.rounds,
            RaceGoal::Length => GOAL_DEFAULTS.length,
        }
    }
}

/// Default goal values per goal type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalDefaults {
    /// Rounds played under [`RaceGoal::Rounds`].
    pub rounds: u32,
    /// Target score under [`RaceGoal::Length`].
    pub length: u32,
}

/// Default goal values.
pub const GOAL_DEFAULTS: GoalDefaults = GoalDefaults { rounds: 5, length: 20 };

/// Momentum change caused by a die face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum MomentumEffect {
    /// -1
    Lose,
    /// 0
    Hold,
    /// +1
    Gain,
    /// +2
    GainTwo,
    /// +3
    GainThree,
}

impl MomentumEffect {
    /// Signed momentum delta.
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            MomentumEffect::Lose => -1,
            MomentumEffect::Hold => 0,
            MomentumEffect::Gain => 1,
            MomentumEffect::GainTwo => 2,
            MomentumEffect::GainThree => 3,
        }
    }

    /// Whether this effect loses momentum.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.delta() < 0
    }
}

impl TryFrom<i8> for MomentumEffect {
    type Error = SetupError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(MomentumEffect::Lose),
            0 => Ok(MomentumEffect::Hold),
            1 => Ok(MomentumEffect::Gain),
            2 => Ok(MomentumEffect::GainTwo),
            3 => Ok(MomentumEffect::GainThree),
            other => Err(SetupError::InvalidMomentumEffect(other)),
        }
    }
}

impl From<MomentumEffect> for i8 {
    fn from(effect: MomentumEffect) -> Self {
        effect.delta() as i8
    }
}

/// Momentum effect for every die face.
///
/// Indexed by face 1-6, so every face has an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MomentumTable([MomentumEffect; DIE_FACES as usize]);

impl MomentumTable {
    /// Create a table from effects for faces 1 through 6.
    #[must_use]
    pub const fn new(effects: [MomentumEffect; DIE_FACES as usize]) -> Self {
        Self(effects)
    }

    /// A table where every face has the same effect.
    #[must_use]
    pub const fn uniform(effect: MomentumEffect) -> Self {
        Self([effect; DIE_FACES as usize])
    }

    /// Effect of a die face. Faces outside 1-6 have no effect.
    #[must_use]
    pub fn effect(&self, face: u8) -> MomentumEffect {
        face.checked_sub(1)
            .and_then(|index| self.0.get(usize::from(index)))
            .copied()
            .unwrap_or(MomentumEffect::Hold)
    }

    /// Signed momentum delta of a die face.
    #[must_use]
    pub fn delta(&self, face: u8) -> i64 {
        self.effect(face).delta()
    }

    /// Replace the effect of one face.
    #[must_use]
    pub fn with_face(mut self, face: u8, effect: MomentumEffect) -> Self {
        if let Some(slot) = face.checked_sub(1).and_then(|i| self.0.get_mut(usize::from(i))) {
            *slot = effect;
        }
        self
    }
}

impl Default for MomentumTable {
    /// 1 loses momentum, 2-4 hold, 5-6 gain.
    fn default() -> Self {
        use MomentumEffect::{Gain, Hold, Lose};
        Self([Lose, Hold, Hold, Hold, Gain, Gain])
    }
}

/// Card allotment and strength parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRules {
    /// Starting copies of each card type per player (0-2).
    pub copies_per_card: u8,
    /// Flat move granted by a burst.
    pub burst_move: u32,
    /// Momentum removed by a stumble when it lands.
    pub stumble_detract: u32,
    /// Momentum banked by a deep breath.
    pub deep_breath_boost: u32,
}

impl Default for CardRules {
    fn default() -> Self {
        Self {
            copies_per_card: 1,
            burst_move: 6,
            stumble_detract: 2,
            deep_breath_boost: 2,
        }
    }
}

impl CardRules {
    /// Rules with no cards dealt.
    #[must_use]
    pub fn without_cards() -> Self {
        Self {
            copies_per_card: 0,
            ..Self::default()
        }
    }

    /// Set starting copies per card.
    #[must_use]
    pub fn with_copies(mut self, copies: u8) -> Self {
        self.copies_per_card = copies;
        self
    }

    /// Set the burst move.
    #[must_use]
    pub fn with_burst_move(mut self, burst_move: u32) -> Self {
        self.burst_move = burst_move;
        self
    }

    /// Set the stumble penalty.
    #[must_use]
    pub fn with_stumble_detract(mut self, detract: u32) -> Self {
        self.stumble_detract = detract;
        self
    }

    /// Set the deep breath boost.
    #[must_use]
    pub fn with_deep_breath_boost(mut self, boost: u32) -> Self {
        self.deep_breath_boost = boost;
        self
    }
}

/// Errors found when validating a setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Too few players: {0} (minimum 2)")]
    TooFewPlayers(usize),

    #[error("Too many players: {0} (maximum 8)")]
    TooManyPlayers(usize),

    #[error("Goal value must be positive")]
    ZeroGoalValue,

    #[error("Invalid copies per card: {0} (maximum 2)")]
    TooManyCopies(u8),

    #[error("Card parameter {name} must be positive")]
    ZeroCardParameter { name: &'static str },

    #[error("Invalid momentum effect: {0}")]
    InvalidMomentumEffect(i8),
}

/// Complete race configuration.
///
/// Immutable once a race is created from it; changing the setup means
/// creating a fresh race.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupState {
    /// Number of players.
    pub players: usize,
    /// What ends the main race.
    pub goal: RaceGoal,
    /// Round count or target score, depending on `goal`.
    pub goal_value: u32,
    /// Momentum effect per die face.
    pub momentum_effects: MomentumTable,
    /// Card allotment and strength.
    pub card_rules: CardRules,
}

impl Default for SetupState {
    fn default() -> Self {
        Self {
            players: 3,
            goal: RaceGoal::Rounds,
            goal_value: GOAL_DEFAULTS.rounds,
            momentum_effects: MomentumTable::default(),
            card_rules: CardRules::default(),
        }
    }
}

impl SetupState {
    /// Create the default setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the player count.
    #[must_use]
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    /// Set the goal type, resetting the goal value to that type's default.
    #[must_use]
    pub fn with_goal(mut self, goal: RaceGoal) -> Self {
        self.goal = goal;
        self.goal_value = goal.default_value();
        self
    }

    /// Set the goal value.
    #[must_use]
    pub fn with_goal_value(mut self, value: u32) -> Self {
        self.goal_value = value;
        self
    }

    /// Set the momentum table.
    #[must_use]
    pub fn with_momentum_effects(mut self, table: MomentumTable) -> Self {
        self.momentum_effects = table;
        self
    }

    /// Set the card rules.
    #[must_use]
    pub fn with_card_rules(mut self, rules: CardRules) -> Self {
        self.card_rules = rules;
        self
    }

    /// Check that this setup describes a playable race.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.players < MIN_PLAYERS {
            return Err(SetupError::TooFewPlayers(self.players));
        }
        if self.players > MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers(self.players));
        }
        if self.goal_value == 0 {
            return Err(SetupError::ZeroGoalValue);
        }

        let rules = &self.card_rules;
        if rules.copies_per_card > MAX_COPIES_PER_CARD {
            return Err(SetupError::TooManyCopies(rules.copies_per_card));
        }
        for (name, value) in [
            ("burstMove", rules.burst_move),
            ("stumbleDetract", rules.stumble_detract),
            ("deepBreathBoost", rules.deep_breath_boost),
        ] {
            if value == 0 {
                return Err(SetupError::ZeroCardParameter { name });
            }
        }

        Ok(())
    }
}
