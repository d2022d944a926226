//! Ball-by-ball innings progression.
//!
//! [`advance_one_ball`] applies exactly one delivery to an [`InningsState`]:
//! outcome, stats, strike rotation, bowler change at the end of an over and
//! the termination checks. Calling it on a finished innings is a no-op.

use tracing::{debug, info};

use crate::engine::outcome::OutcomeSource;
use crate::engine::stats::format_overs;
use crate::models::delivery::{BallOutcome, DeliveryEvent};
use crate::models::innings::{InningsEnd, InningsState};

/// Distinct bowlers allowed per innings. Exceeding it ends the innings.
pub const MAX_BOWLERS_PER_INNINGS: usize = 5;

/// Bowl one delivery.
///
/// Returns `None` without touching the state when the innings is already
/// over. `target` is the chasing side's target, `None` in the first innings.
pub fn advance_one_ball(
    state: &mut InningsState,
    outcomes: &mut dyn OutcomeSource,
    target: Option<u32>,
) -> Option<DeliveryEvent> {
    if state.end.is_some() {
        return None;
    }
    if state.is_exhausted() {
        // Limits reached by a path that did not record a reason.
        close_naturally(state);
        return None;
    }
    // Non-exhausted implies a striker is at the crease.
    let striker = state.striker?;

    let outcome = outcomes.next_outcome();
    state.balls_bowled += 1;

    let bowler = state.bowler_one.clone().unwrap_or_default();
    let batter = state.batting.players()[striker].clone();

    state.bowler_mut(&bowler);
    state.batsman_mut(striker);
    if let Some(non_striker) = state.non_striker {
        state.batsman_mut(non_striker);
    }

    match outcome {
        BallOutcome::Wicket => apply_wicket(state, &bowler, striker),
        BallOutcome::Runs(runs) => apply_runs(state, &bowler, striker, runs),
    }

    // Two independent swap triggers, applied in this order.
    let odd_runs = outcome.rotates_strike();
    let over_complete = state.balls_bowled % state.config.balls_per_over == 0;
    if odd_runs {
        state.swap_strike();
    }
    if over_complete {
        change_bowler(state);
        state.swap_strike();
    }

    let event = DeliveryEvent {
        ball: state.balls_bowled,
        overs: format_overs(state.balls_bowled, state.config.balls_per_over),
        bowler,
        commentary: DeliveryEvent::commentary_for(&batter, outcome),
        batter,
        outcome,
    };
    debug!(
        ball = event.ball,
        bowler = %event.bowler,
        batter = %event.batter,
        outcome = %outcome,
        score = %state.score_line(),
        "delivery"
    );
    state.last_event = Some(event.clone());

    if let Some(target) = target {
        if state.total_runs >= target {
            let wickets_remaining = state.config.max_wickets.saturating_sub(state.wickets);
            finish(state, InningsEnd::TargetReached { wickets_remaining });
            return Some(event);
        }
    }

    if let Some(current) = state.bowler_one.clone() {
        state.used_bowlers.insert(current);
    }
    if state.used_bowlers.len() > MAX_BOWLERS_PER_INNINGS {
        finish(state, InningsEnd::BowlerLimit);
        return Some(event);
    }

    close_naturally(state);
    Some(event)
}

/// Bowl until the innings ends. Returns the number of deliveries bowled.
pub fn play_innings(
    state: &mut InningsState,
    outcomes: &mut dyn OutcomeSource,
    target: Option<u32>,
) -> u32 {
    let mut bowled = 0;
    while advance_one_ball(state, outcomes, target).is_some() {
        bowled += 1;
    }
    bowled
}

fn apply_wicket(state: &mut InningsState, bowler: &str, striker: usize) {
    state.wickets += 1;
    let figures = state.bowler_mut(bowler);
    figures.wickets_taken += 1;
    figures.balls_bowled += 1;
    state.batsman_mut(striker).balls_faced += 1;

    if state.next_batsman_index < state.batting.players().len() {
        let incoming = state.next_batsman_index;
        state.striker = Some(incoming);
        *state.batsman_mut(incoming) = Default::default();
        state.next_batsman_index += 1;
    } else {
        state.striker = None;
    }
}

fn apply_runs(state: &mut InningsState, bowler: &str, striker: usize, runs: u32) {
    state.total_runs += runs;
    let figures = state.bowler_mut(bowler);
    figures.runs_conceded += runs;
    figures.balls_bowled += 1;
    let batting = state.batsman_mut(striker);
    batting.runs += runs;
    batting.balls_faced += 1;
}

fn change_bowler(state: &mut InningsState) {
    state.bowler_two = state.bowler_one.take();
    let next = state.rotation.next_bowler(&state.bowling).map(str::to_string);
    if let Some(next) = next.as_deref() {
        state.bowler_mut(next);
    }
    state.bowler_one = next.or_else(|| state.bowler_two.clone());
}

fn close_naturally(state: &mut InningsState) {
    if state.is_all_out() {
        finish(state, InningsEnd::AllOut);
    } else if state.balls_bowled >= state.config.max_balls() {
        finish(state, InningsEnd::OversComplete);
    }
}

fn finish(state: &mut InningsState, end: InningsEnd) {
    if state.end.is_some() {
        return;
    }
    state.end = Some(end);
    info!(
        team = state.batting.name(),
        score = %state.score_line(),
        overs = %state.overs(),
        reason = %end,
        "innings ended"
    );
}
