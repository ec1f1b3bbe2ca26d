//! Card-effect pipeline.
//!
//! Each turn the active player's cards are checked by a short, fixed list of
//! guarded rules. A rule either passes control on (`RuleFlow::Continue`) or
//! ends the turn's card handling (`RuleFlow::Stop`). If no rule stops, the
//! roll's momentum effect applies normally.
//!
//! Priority order:
//!
//! 1. Stumble: queue a penalty against an opponent, continue
//! 2. Burst: on a raw six, flat move and momentum reset, stop
//! 3. Deep Breath: on a raw six at momentum 4+, bank a boost, stop
//! 4. Second Chance: on a losing raw roll, re-roll, continue
//! 5. Hail Mary: on a losing effective roll, keep momentum, stop

use smallvec::SmallVec;

use crate::core::{
    clamp_momentum, roll_die, PendingStumble, PlayerId, PlayerMap, RandomSource, SetupState,
};
use crate::rules::get_leaders;

use super::hand::{CardHand, CardKind};

/// Die face that enables burst and deep breath.
pub const SIX: u8 = 6;

/// Momentum needed before the turn to take a deep breath.
pub const DEEP_BREATH_MIN_MOMENTUM: i64 = 4;

/// Read-only facts about the turn being resolved.
#[derive(Clone, Copy, Debug)]
pub struct TurnContext<'a> {
    /// Acting player.
    pub player: PlayerId,
    /// Roll as it came off the die.
    pub raw_roll: u8,
    /// Momentum after deferred effects, before this turn's roll.
    pub momentum_before: i64,
    /// Rounds completed before this turn.
    pub completed_rounds: u32,
    /// Scores before this turn.
    pub scores: &'a PlayerMap<i64>,
    /// Race configuration.
    pub setup: &'a SetupState,
}

/// A card played during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardPlay {
    /// Stumble queued against `target`.
    Stumble { target: PlayerId },
    /// Burst taken.
    Burst,
    /// Deep breath taken.
    DeepBreath,
    /// Roll replaced by `reroll`.
    SecondChance { reroll: u8 },
    /// Momentum loss cancelled.
    HailMary,
}

impl CardPlay {
    /// Which card was spent.
    #[must_use]
    pub const fn kind(self) -> CardKind {
        match self {
            CardPlay::Stumble { .. } => CardKind::Stumble,
            CardPlay::Burst => CardKind::Burst,
            CardPlay::DeepBreath => CardKind::DeepBreath,
            CardPlay::SecondChance { .. } => CardKind::SecondChance,
            CardPlay::HailMary => CardKind::HailMary,
        }
    }
}

impl std::fmt::Display for CardPlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardPlay::Stumble { target } => write!(f, "stumble → {target}"),
            CardPlay::SecondChance { reroll } => write!(f, "secondChance → {reroll}"),
            other => f.write_str(other.kind().name()),
        }
    }
}

/// Whether the pipeline goes on to the next rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleFlow {
    /// Evaluate the next rule.
    Continue,
    /// Card handling is done for this turn.
    Stop,
}

/// Working result of a turn, refined rule by rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Roll used for momentum, after any re-roll.
    pub effective_roll: u8,
    /// Acting player's momentum after the turn.
    pub momentum_after: i64,
    /// Score gained this turn.
    pub movement: i64,
    /// Acting player's cards after spending.
    pub hand: CardHand,
    /// Stumble queued against an opponent.
    pub stumble: Option<(PlayerId, PendingStumble)>,
    /// Momentum banked for the acting player's next turn.
    pub banked_boost: i64,
    /// Cards played, in pipeline order.
    pub plays: SmallVec<[CardPlay; 2]>,
}

impl TurnOutcome {
    fn new(ctx: &TurnContext<'_>, hand: CardHand) -> Self {
        Self {
            effective_roll: ctx.raw_roll,
            momentum_after: ctx.momentum_before,
            movement: 0,
            hand,
            stumble: None,
            banked_boost: 0,
            plays: SmallVec::new(),
        }
    }

    /// Played cards joined with ", ", or `None` if nothing was played.
    #[must_use]
    pub fn card_label(&self) -> Option<String> {
        if self.plays.is_empty() {
            return None;
        }
        let notes: Vec<String> = self.plays.iter().map(ToString::to_string).collect();
        Some(notes.join(", "))
    }
}

/// A guarded card rule.
pub type CardRule = fn(&TurnContext<'_>, &mut TurnOutcome, &mut dyn RandomSource) -> RuleFlow;

/// Card rules in priority order.
pub const PIPELINE: [(CardKind, CardRule); 5] = [
    (CardKind::Stumble, play_stumble),
    (CardKind::Burst, play_burst),
    (CardKind::DeepBreath, play_deep_breath),
    (CardKind::SecondChance, play_second_chance),
    (CardKind::HailMary, play_hail_mary),
];

/// Run the pipeline for one turn.
///
/// `rng` is only drawn from by a second chance re-roll.
pub fn resolve_cards(
    ctx: &TurnContext<'_>,
    hand: CardHand,
    rng: &mut dyn RandomSource,
) -> TurnOutcome {
    let mut outcome = TurnOutcome::new(ctx, hand);

    for (_, rule) in PIPELINE {
        if rule(ctx, &mut outcome, rng) == RuleFlow::Stop {
            return outcome;
        }
    }

    apply_roll(ctx, &mut outcome);
    outcome
}

/// Apply the effective roll's momentum delta and move by the new momentum.
fn apply_roll(ctx: &TurnContext<'_>, outcome: &mut TurnOutcome) {
    let delta = ctx.setup.momentum_effects.delta(outcome.effective_roll);
    outcome.momentum_after = clamp_momentum(ctx.momentum_before + delta);
    outcome.movement = outcome.momentum_after;
}

/// Pick who a stumble lands on.
///
/// The first leader other than `player`, else the first other player by
/// index, else nobody.
#[must_use]
pub fn stumble_target(scores: &PlayerMap<i64>, player: PlayerId) -> Option<PlayerId> {
    get_leaders(scores.as_slice())
        .into_iter()
        .find(|&p| p != player)
        .or_else(|| scores.player_ids().find(|&p| p != player))
}

fn play_stumble(
    ctx: &TurnContext<'_>,
    outcome: &mut TurnOutcome,
    _rng: &mut dyn RandomSource,
) -> RuleFlow {
    if !outcome.hand.has(CardKind::Stumble) {
        return RuleFlow::Continue;
    }
    let Some(target) = stumble_target(ctx.scores, ctx.player) else {
        return RuleFlow::Continue;
    };

    outcome.hand.spend(CardKind::Stumble);
    outcome.stumble = Some((
        target,
        PendingStumble {
            amount: i64::from(ctx.setup.card_rules.stumble_detract),
            trigger_round: ctx.completed_rounds + 1,
        },
    ));
    outcome.plays.push(CardPlay::Stumble { target });
    RuleFlow::Continue
}

fn play_burst(
    ctx: &TurnContext<'_>,
    outcome: &mut TurnOutcome,
    _rng: &mut dyn RandomSource,
) -> RuleFlow {
    if ctx.raw_roll != SIX || !outcome.hand.spend(CardKind::Burst) {
        return RuleFlow::Continue;
    }

    outcome.movement = i64::from(ctx.setup.card_rules.burst_move);
    outcome.momentum_after = 0;
    outcome.plays.push(CardPlay::Burst);
    RuleFlow::Stop
}

fn play_deep_breath(
    ctx: &TurnContext<'_>,
    outcome: &mut TurnOutcome,
    _rng: &mut dyn RandomSource,
) -> RuleFlow {
    if ctx.raw_roll != SIX
        || ctx.momentum_before < DEEP_BREATH_MIN_MOMENTUM
        || !outcome.hand.spend(CardKind::DeepBreath)
    {
        return RuleFlow::Continue;
    }

    outcome.movement = 0;
    outcome.momentum_after = ctx.momentum_before;
    outcome.banked_boost = i64::from(ctx.setup.card_rules.deep_breath_boost);
    outcome.plays.push(CardPlay::DeepBreath);
    RuleFlow::Stop
}

fn play_second_chance(
    ctx: &TurnContext<'_>,
    outcome: &mut TurnOutcome,
    rng: &mut dyn RandomSource,
) -> RuleFlow {
    let losing = ctx.setup.momentum_effects.effect(ctx.raw_roll).is_negative();
    if !losing || !outcome.hand.spend(CardKind::SecondChance) {
        return RuleFlow::Continue;
    }

    let reroll = roll_die(rng.next_sample());
    outcome.effective_roll = reroll;
    outcome.plays.push(CardPlay::SecondChance { reroll });
    RuleFlow::Continue
}

fn play_hail_mary(
    ctx: &TurnContext<'_>,
    outcome: &mut TurnOutcome,
    _rng: &mut dyn RandomSource,
) -> RuleFlow {
    let losing = ctx.setup.momentum_effects.effect(outcome.effective_roll).is_negative();
    if !losing || !outcome.hand.spend(CardKind::HailMary) {
        return RuleFlow::Continue;
    }

    outcome.movement = ctx.momentum_before;
    outcome.momentum_after = ctx.momentum_before;
    outcome.plays.push(CardPlay::HailMary);
    RuleFlow::Stop
}
