//! Cards: one-shot modifiers a player spends during their own turn.
//!
//! - `CardKind`: the five card types
//! - `CardHand`: remaining copies per card for one player
//! - `resolve_cards`: the fixed-priority pipeline that turns a roll into a
//!   turn outcome

mod hand;
mod pipeline;

pub use hand::{CardHand, CardKind};
pub use pipeline::{
    resolve_cards, stumble_target, CardPlay, CardRule, RuleFlow, TurnContext, TurnOutcome,
    DEEP_BREATH_MIN_MOMENTUM, PIPELINE, SIX,
};
