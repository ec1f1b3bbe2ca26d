//! Card tests through the full resolver.
//!
//! These tests verify card effects as seen in race state:
//! - Cards only ever decrease
//! - Deferred effects land on the right turn
//! - Labels list every card played, in pipeline order

use dice_race::cards::{CardHand, CardKind};
use dice_race::core::{CardRules, PlayerId, RaceState, ScriptedSource, SetupState};
use dice_race::rules::resolve_turn;

fn with_hand(players: usize, rules: CardRules, hand: CardHand) -> RaceState {
    let setup = SetupState::new()
        .with_players(players)
        .with_goal_value(20)
        .with_card_rules(rules);
    let mut state = RaceState::new(setup).started();
    for player in PlayerId::all(players) {
        state.player_cards[player] = hand;
    }
    state
}

/// Stumble lands a round later, even when the target acts right after.
#[test]
fn test_stumble_delay_is_one_round() {
    let hand = CardHand { stumble: 1, ..CardHand::default() };
    let mut state = with_hand(3, CardRules::without_cards().with_stumble_detract(3), hand);
    state.momentum[PlayerId::new(1)] = 4;
    let mut rng = ScriptedSource::default();

    // Player 0 stumbles player 1 (first other leader in a three-way tie).
    state = resolve_turn(&state, 3, &mut rng);
    assert_eq!(state.pending_stumble_total(PlayerId::new(1)), 3);

    // Player 1 acts in the same round: not yet due. Player 1 also stumbles
    // the leader, player 0.
    state = resolve_turn(&state, 3, &mut rng);
    assert_eq!(state.momentum[PlayerId::new(1)], 4);
    assert_eq!(state.pending_stumble_total(PlayerId::new(0)), 3);

    // Player 2 stumbles the leader, player 1. Round closes.
    state = resolve_turn(&state, 3, &mut rng);
    assert_eq!(state.completed_rounds, 1);
    assert_eq!(state.pending_stumble_total(PlayerId::new(1)), 6);

    // Player 0's stumble lands: momentum 1 - 3 clamps to 0.
    state = resolve_turn(&state, 3, &mut rng);
    assert_eq!(state.momentum[PlayerId::new(0)], 0);
    assert_eq!(state.last_move, Some(0));

    // Both stumbles against player 1 were played in round 0, so both land.
    state = resolve_turn(&state, 3, &mut rng);
    assert_eq!(state.momentum[PlayerId::new(1)], 0);
    assert_eq!(state.pending_stumble_total(PlayerId::new(1)), 0);
}

/// A stumble played on the closing turn of the main race lands on the
/// target's first shootout turn: the due round counts every round, main or
/// shootout.
#[test]
fn test_stumble_from_last_round_lands_in_shootout() {
    let setup = SetupState::new()
        .with_players(2)
        .with_goal_value(1)
        .with_card_rules(CardRules::without_cards());
    let mut state = RaceState::new(setup).started();
    state.player_cards[PlayerId::new(1)].stumble = 1;
    let mut rng = ScriptedSource::default();

    state = resolve_turn(&state, 3, &mut rng);
    state = resolve_turn(&state, 3, &mut rng);
    assert_eq!(state.last_card_played.as_deref(), Some("stumble → Player 1"));
    assert_eq!(state.completed_rounds, 1);
    assert_eq!(
        state.shootout_players.as_deref(),
        Some(&[PlayerId::new(0), PlayerId::new(1)][..])
    );
    assert_eq!(state.active_player, PlayerId::new(0));
    assert_eq!(state.pending_stumbles[PlayerId::new(0)].len(), 1);

    // Momentum 1 - 2 clamps to 0 before the roll.
    state = resolve_turn(&state, 3, &mut rng);
    assert_eq!(state.momentum[PlayerId::new(0)], 0);
    assert_eq!(state.last_move, Some(0));
    assert_eq!(state.pending_stumble_total(PlayerId::new(0)), 0);
}

/// Every label note appears in pipeline order.
#[test]
fn test_label_lists_all_cards() {
    let hand = CardHand {
        stumble: 1,
        second_chance: 1,
        hail_mary: 1,
        ..CardHand::default()
    };
    let state = with_hand(2, CardRules::without_cards(), hand);
    let mut rng = ScriptedSource::from_faces(&[1]);

    let next = resolve_turn(&state, 1, &mut rng);

    assert_eq!(
        next.last_card_played.as_deref(),
        Some("stumble → Player 2, secondChance → 1, hailMary")
    );
    assert_eq!(next.last_move, Some(1));
    assert_eq!(next.momentum[PlayerId::new(0)], 1);
    assert_eq!(next.player_cards[PlayerId::new(0)].total(), 0);
}

/// Second chance on a good re-roll leaves hail mary in hand.
#[test]
fn test_second_chance_saves_hail_mary() {
    let hand = CardHand {
        second_chance: 1,
        hail_mary: 1,
        ..CardHand::default()
    };
    let state = with_hand(2, CardRules::without_cards(), hand);
    let mut rng = ScriptedSource::from_faces(&[6]);

    let next = resolve_turn(&state, 1, &mut rng);

    assert_eq!(next.last_roll, Some(1));
    assert_eq!(next.momentum[PlayerId::new(0)], 2);
    assert_eq!(next.last_move, Some(2));
    assert_eq!(next.player_cards[PlayerId::new(0)].hail_mary, 1);
    assert_eq!(next.player_cards[PlayerId::new(0)].second_chance, 0);
}

/// A re-roll to six does not trigger burst: burst reads the raw roll.
#[test]
fn test_reroll_to_six_does_not_burst() {
    let hand = CardHand {
        second_chance: 1,
        burst: 1,
        ..CardHand::default()
    };
    let state = with_hand(2, CardRules::without_cards().with_burst_move(9), hand);
    let mut rng = ScriptedSource::from_faces(&[6]);

    let next = resolve_turn(&state, 1, &mut rng);

    assert_eq!(next.last_move, Some(2));
    assert_eq!(next.player_cards[PlayerId::new(0)].burst, 1);
}

/// Deep breath then a banked boost the next turn.
#[test]
fn test_deep_breath_cycle() {
    let hand = CardHand { deep_breath: 1, ..CardHand::default() };
    let mut state = with_hand(2, CardRules::without_cards().with_deep_breath_boost(3), hand);
    state.momentum[PlayerId::new(0)] = 4;
    let mut rng = ScriptedSource::default();

    state = resolve_turn(&state, 6, &mut rng);
    assert_eq!(state.last_card_played.as_deref(), Some("deepBreath"));
    assert_eq!(state.scores[PlayerId::new(0)], 0);

    state = resolve_turn(&state, 2, &mut rng);
    // Boost lands, then a losing roll: 4 + 3 -> 5, then -1.
    state = resolve_turn(&state, 1, &mut rng);
    assert_eq!(state.momentum[PlayerId::new(0)], 4);
    assert_eq!(state.scores[PlayerId::new(0)], 4);
    assert_eq!(state.pending_deep_breath_boost[PlayerId::new(0)], 0);
}

/// Cards never go below zero, however long the race runs.
#[test]
fn test_cards_only_decrease() {
    let setup = SetupState::new()
        .with_players(3)
        .with_card_rules(CardRules::default().with_copies(2));
    let mut state = RaceState::new(setup).started();
    let mut rng = dice_race::GameRng::new(8);
    let mut previous = state.player_cards.clone();

    for _ in 0..60 {
        let roll = rng.roll();
        state = resolve_turn(&state, roll, &mut rng);
        for player in PlayerId::all(3) {
            for kind in CardKind::ALL {
                let now = state.player_cards[player].copies(kind);
                assert!(now <= previous[player].copies(kind));
                assert!(now <= 2);
            }
        }
        previous = state.player_cards.clone();
    }
}
