//! Turn resolver: the race state machine.
//!
//! `resolve_turn` takes a snapshot and a die roll and returns the next
//! snapshot. Per call:
//! - Land deferred effects on the active player (banked boost, due stumbles)
//! - Run the card pipeline to get this turn's momentum and move
//! - Advance turn order through the current roster, closing rounds
//! - At a qualifying round boundary, declare a winner or (re)start a shootout
//!
//! Phases: NotStarted → Racing → (TieBreak →)* Finished.

use tracing::{debug, trace};

use crate::cards::{resolve_cards, TurnContext};
use crate::core::{clamp_momentum, PlayerId, RaceGoal, RaceState, RandomSource, Roster};

/// Players tied for the highest score, in index order.
///
/// ```
/// use dice_race::core::PlayerId;
/// use dice_race::rules::get_leaders;
///
/// assert_eq!(get_leaders(&[3, 7, 7]), vec![PlayerId::new(1), PlayerId::new(2)]);
/// assert!(get_leaders(&[]).is_empty());
/// ```
#[must_use]
pub fn get_leaders(scores: &[i64]) -> Vec<PlayerId> {
    let Some(&top) = scores.iter().max() else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score == top)
        .map(|(index, _)| PlayerId::new(index as u8))
        .collect()
}

/// Members of `roster` holding the highest score among them, in roster order.
fn roster_leaders(state: &RaceState, roster: &[PlayerId]) -> Roster {
    let Some(top) = roster.iter().map(|&p| state.scores[p]).max() else {
        return Roster::new();
    };
    roster.iter().copied().filter(|&p| state.scores[p] == top).collect()
}

/// Resolve one turn for the active player.
///
/// Returns `current` unchanged if the race has not started or is finished.
/// `rng` is only drawn from when a second chance re-rolls.
pub fn resolve_turn<R: RandomSource>(current: &RaceState, roll: u8, rng: &mut R) -> RaceState {
    if !current.in_progress || current.winner.is_some() {
        return current.clone();
    }

    let setup = &current.setup;
    let player = current.active_player;
    let mut next = current.clone();

    // Deferred effects land before the roll is read.
    let boost = std::mem::take(&mut next.pending_deep_breath_boost[player]);
    let (due, waiting): (Vec<_>, Vec<_>) = current.pending_stumbles[player]
        .iter()
        .copied()
        .partition(|s| s.trigger_round <= current.completed_rounds);
    let penalty: i64 = due.iter().map(|s| s.amount).sum();
    next.pending_stumbles[player] = waiting.into_iter().collect();
    let momentum_before = clamp_momentum(current.momentum[player] + boost - penalty);

    let ctx = TurnContext {
        player,
        raw_roll: roll,
        momentum_before,
        completed_rounds: current.completed_rounds,
        scores: &current.scores,
        setup,
    };
    let outcome = resolve_cards(&ctx, current.player_cards[player], rng);

    next.momentum[player] = outcome.momentum_after;
    next.scores[player] += outcome.movement;
    next.player_cards[player] = outcome.hand;
    next.pending_deep_breath_boost[player] += outcome.banked_boost;
    if let Some((target, stumble)) = outcome.stumble {
        next.pending_stumbles[target].push_back(stumble);
    }
    next.last_roll = Some(roll);
    next.last_move = Some(outcome.movement);
    next.last_card_played = outcome.card_label();

    trace!(
        player = %player,
        roll,
        effective_roll = outcome.effective_roll,
        momentum_before,
        momentum_after = outcome.momentum_after,
        movement = outcome.movement,
        card = next.last_card_played.as_deref().unwrap_or("-"),
        "turn resolved"
    );

    // Turn order through the current roster.
    let roster = current.roster();
    let position = roster.iter().position(|&p| p == player).unwrap_or(0);
    let next_player = roster
        .get((position + 1) % roster.len().max(1))
        .copied()
        .unwrap_or(player);
    let turns_played = current.shootout_turns_played + 1;
    let round_finished = turns_played as usize >= roster.len();
    if round_finished {
        next.completed_rounds += 1;
    }

    let goal_value = i64::from(setup.goal_value);
    next.finish_triggered = match setup.goal {
        RaceGoal::Length => {
            current.finish_triggered || next.scores.as_slice().iter().any(|&s| s >= goal_value)
        }
        // Always armed; the round count alone decides the finish.
        RaceGoal::Rounds => true,
    };

    let finish_met = round_finished
        && match setup.goal {
            RaceGoal::Rounds => i64::from(next.completed_rounds) >= goal_value,
            RaceGoal::Length => next.finish_triggered,
        };

    match &current.shootout_players {
        None if finish_met => {
            let leaders: Roster = get_leaders(next.scores.as_slice()).into_iter().collect();
            settle_round(next, leaders, next_player, false)
        }
        Some(shootout) if round_finished => {
            let survivors = roster_leaders(&next, shootout);
            next.shootout_rounds += 1;
            settle_round(next, survivors, next_player, true)
        }
        _ => {
            next.active_player = next_player;
            next.shootout_turns_played = if round_finished { 0 } else { turns_played };
            next
        }
    }
}

/// Close a qualifying round: a sole contender wins, otherwise a shootout
/// (re)starts with the contenders, led by the first of them.
fn settle_round(
    mut next: RaceState,
    contenders: Roster,
    next_player: PlayerId,
    in_shootout: bool,
) -> RaceState {
    next.shootout_turns_played = 0;

    let Some(&first) = contenders.first() else {
        // Unreachable with at least one player; keep racing.
        next.active_player = next_player;
        return next;
    };

    if contenders.len() == 1 {
        debug!(
            winner = %first,
            completed_rounds = next.completed_rounds,
            shootout_rounds = next.shootout_rounds,
            "race finished"
        );
        next.winner = Some(first);
        next.in_progress = false;
        next.shootout_players = None;
        next.active_player = next_player;
    } else {
        if in_shootout {
            debug!(survivors = ?contenders.as_slice(), "shootout narrowed");
        } else {
            debug!(leaders = ?contenders.as_slice(), "tie at finish, shootout started");
        }
        next.active_player = first;
        next.shootout_players = Some(contenders);
    }

    next
}

/// Resolve a sequence of rolls, returning every intermediate state.
///
/// The returned vector starts with `start` and has one more entry than
/// `rolls`.
pub fn resolve_rolls<R: RandomSource>(
    start: &RaceState,
    rolls: &[u8],
    rng: &mut R,
) -> Vec<RaceState> {
    let mut history = Vec::with_capacity(rolls.len() + 1);
    let mut current = start.clone();
    history.push(current.clone());
    for &roll in rolls {
        current = resolve_turn(&current, roll, rng);
        history.push(current.clone());
    }
    history
}
