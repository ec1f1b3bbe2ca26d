//! Property tests for the resolver.
//!
//! Random setups and dice sequences check the invariants every reachable
//! state must hold.

use proptest::prelude::*;

use dice_race::core::{
    CardRules, GameRng, MomentumEffect, MomentumTable, PlayerId, RaceGoal, RaceState,
    SetupState, MOMENTUM_MAX, MOMENTUM_MIN,
};
use dice_race::rules::{resolve_rolls, resolve_turn};

fn effect_strategy() -> impl Strategy<Value = MomentumEffect> {
    prop_oneof![
        Just(MomentumEffect::Lose),
        Just(MomentumEffect::Hold),
        Just(MomentumEffect::Gain),
        Just(MomentumEffect::GainTwo),
        Just(MomentumEffect::GainThree),
    ]
}

prop_compose! {
    fn setup_strategy()(
        players in 2usize..=6,
        length_goal in any::<bool>(),
        goal_value in 1u32..=12,
        effects in proptest::array::uniform6(effect_strategy()),
        copies in 0u8..=2,
        burst_move in 1u32..=10,
        stumble_detract in 1u32..=4,
        deep_breath_boost in 1u32..=4,
    ) -> SetupState {
        let goal = if length_goal { RaceGoal::Length } else { RaceGoal::Rounds };
        SetupState::new()
            .with_players(players)
            .with_goal(goal)
            .with_goal_value(goal_value)
            .with_momentum_effects(MomentumTable::new(effects))
            .with_card_rules(
                CardRules::default()
                    .with_copies(copies)
                    .with_burst_move(burst_move)
                    .with_stumble_detract(stumble_detract)
                    .with_deep_breath_boost(deep_breath_boost),
            )
    }
}

fn history(setup: &SetupState, rolls: &[u8], seed: u64) -> Vec<RaceState> {
    let start = RaceState::new(setup.clone()).started();
    resolve_rolls(&start, rolls, &mut GameRng::new(seed))
}

proptest! {
    #[test]
    fn prop_deterministic(
        setup in setup_strategy(),
        rolls in proptest::collection::vec(1u8..=6, 0..80),
        seed in any::<u64>(),
    ) {
        prop_assert_eq!(history(&setup, &rolls, seed), history(&setup, &rolls, seed));
    }

    #[test]
    fn prop_momentum_in_bounds(
        setup in setup_strategy(),
        rolls in proptest::collection::vec(1u8..=6, 0..80),
        seed in any::<u64>(),
    ) {
        for state in history(&setup, &rolls, seed) {
            for (_, &momentum) in state.momentum.iter() {
                prop_assert!((MOMENTUM_MIN..=MOMENTUM_MAX).contains(&momentum));
            }
        }
    }

    #[test]
    fn prop_round_cadence_matches_roster(
        setup in setup_strategy(),
        rolls in proptest::collection::vec(1u8..=6, 0..80),
        seed in any::<u64>(),
    ) {
        let states = history(&setup, &rolls, seed);
        let mut turns_since_boundary = 0usize;
        for pair in states.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if !before.in_progress {
                prop_assert_eq!(before, after);
                continue;
            }
            turns_since_boundary += 1;
            if after.completed_rounds > before.completed_rounds {
                prop_assert_eq!(after.completed_rounds, before.completed_rounds + 1);
                prop_assert_eq!(turns_since_boundary, before.roster().len());
                turns_since_boundary = 0;
            }
        }
    }

    #[test]
    fn prop_single_winner_terminates(
        setup in setup_strategy(),
        rolls in proptest::collection::vec(1u8..=6, 0..80),
        seed in any::<u64>(),
    ) {
        let mut rng = GameRng::new(seed);
        for state in history(&setup, &rolls, seed) {
            prop_assert!(state.in_progress != state.winner.is_some());
            if state.winner.is_some() {
                prop_assert_eq!(state.shootout_players.as_ref(), None);
                let again = resolve_turn(&state, 6, &mut rng);
                prop_assert_eq!(&again, &state);
            }
        }
    }

    #[test]
    fn prop_shootout_roster_narrows(
        setup in setup_strategy(),
        rolls in proptest::collection::vec(1u8..=6, 0..80),
        seed in any::<u64>(),
    ) {
        let states = history(&setup, &rolls, seed);
        for pair in states.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if let Some(roster) = &after.shootout_players {
                prop_assert!(roster.len() >= 2);
                prop_assert!(roster.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(roster.contains(&after.active_player));
            }
            if let (Some(old), Some(new)) = (&before.shootout_players, &after.shootout_players) {
                prop_assert!(new.iter().all(|p| old.contains(p)));
            }
        }
    }

    #[test]
    fn prop_cards_never_increase(
        setup in setup_strategy(),
        rolls in proptest::collection::vec(1u8..=6, 0..80),
        seed in any::<u64>(),
    ) {
        let copies = u32::from(setup.card_rules.copies_per_card) * 5;
        let states = history(&setup, &rolls, seed);
        for pair in states.windows(2) {
            for player in PlayerId::all(setup.players) {
                let before = pair[0].player_cards[player].total();
                let after = pair[1].player_cards[player].total();
                prop_assert!(after <= before);
                prop_assert!(after <= copies);
            }
        }
    }
}
