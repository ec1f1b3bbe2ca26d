//! Card types and per-player card hands.

use serde::{Deserialize, Serialize};

/// The five one-shot cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardKind {
    /// Flat move on a six; resets own momentum.
    Burst,
    /// Cancels a momentum loss.
    HailMary,
    /// Queues a momentum penalty against an opponent.
    Stumble,
    /// Re-rolls a momentum-losing roll.
    SecondChance,
    /// Trades a six at high momentum for a banked boost.
    DeepBreath,
}

impl CardKind {
    /// Every card kind.
    pub const ALL: [CardKind; 5] = [
        CardKind::Burst,
        CardKind::HailMary,
        CardKind::Stumble,
        CardKind::SecondChance,
        CardKind::DeepBreath,
    ];

    /// Canonical card name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Burst => "burst",
            CardKind::HailMary => "hailMary",
            CardKind::Stumble => "stumble",
            CardKind::SecondChance => "secondChance",
            CardKind::DeepBreath => "deepBreath",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Remaining copies of each card for one player.
///
/// Copies only ever decrease.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHand {
    pub burst: u8,
    pub hail_mary: u8,
    pub stumble: u8,
    pub second_chance: u8,
    pub deep_breath: u8,
}

impl CardHand {
    /// A hand holding `copies` of every card.
    #[must_use]
    pub const fn full(copies: u8) -> Self {
        Self {
            burst: copies,
            hail_mary: copies,
            stumble: copies,
            second_chance: copies,
            deep_breath: copies,
        }
    }

    fn slot(&mut self, kind: CardKind) -> &mut u8 {
        match kind {
            CardKind::Burst => &mut self.burst,
            CardKind::HailMary => &mut self.hail_mary,
            CardKind::Stumble => &mut self.stumble,
            CardKind::SecondChance => &mut self.second_chance,
            CardKind::DeepBreath => &mut self.deep_breath,
        }
    }

    /// Remaining copies of a card.
    #[must_use]
    pub const fn copies(&self, kind: CardKind) -> u8 {
        match kind {
            CardKind::Burst => self.burst,
            CardKind::HailMary => self.hail_mary,
            CardKind::Stumble => self.stumble,
            CardKind::SecondChance => self.second_chance,
            CardKind::DeepBreath => self.deep_breath,
        }
    }

    /// Whether at least one copy of a card remains.
    #[must_use]
    pub const fn has(&self, kind: CardKind) -> bool {
        self.copies(kind) > 0
    }

    /// Spend one copy. Returns false, changing nothing, if none remain.
    pub fn spend(&mut self, kind: CardKind) -> bool {
        let slot = self.slot(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Total copies across all cards.
    #[must_use]
    pub fn total(&self) -> u32 {
        CardKind::ALL.iter().map(|&k| u32::from(self.copies(k))).sum()
    }
}
