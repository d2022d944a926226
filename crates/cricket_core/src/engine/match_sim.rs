//! Two-innings match orchestration.
//!
//! Team A bats first. When the first innings ends the target is set to its
//! total plus one and team B chases. [`CricketMatch::step`] bowls a single
//! delivery and handles the hand-over between innings, so callers can pace a
//! live match and snapshot it in between; [`CricketMatch::play_match`] runs
//! it straight through.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::engine::config::MatchConfig;
use crate::engine::innings::advance_one_ball;
use crate::engine::outcome::{OutcomeSource, SeededOutcomes};
use crate::engine::snapshot::{LiveStats, MatchPhase, MatchSnapshot, TeamScore};
use crate::error::{MatchError, Result};
use crate::models::delivery::DeliveryEvent;
use crate::models::history::{InningsSummary, MatchRecord, TeamTotal};
use crate::models::innings::{InningsEnd, InningsState};
use crate::models::outcome::MatchOutcome;
use crate::models::roster::Roster;

pub const DEFAULT_VENUE: &str = "at Kanpur, Green Park";

pub struct CricketMatch {
    id: Uuid,
    title: String,
    venue: String,
    config: MatchConfig,
    team_a: Arc<Roster>,
    team_b: Arc<Roster>,
    first: InningsState,
    second: InningsState,
    target: Option<u32>,
    outcome: Option<MatchOutcome>,
    result: String,
    phase: MatchPhase,
    outcomes: Box<dyn OutcomeSource>,
}

impl std::fmt::Debug for CricketMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CricketMatch")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("phase", &self.phase)
            .field("target", &self.target)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl CricketMatch {
    /// Create a match with a random id and the given outcome source.
    pub fn new(
        team_a: Arc<Roster>,
        team_b: Arc<Roster>,
        config: MatchConfig,
        outcomes: Box<dyn OutcomeSource>,
    ) -> Result<Self> {
        Self::build(Uuid::new_v4(), team_a, team_b, config, outcomes)
    }

    /// Fully reproducible match: the seed drives both the id and every
    /// delivery.
    pub fn with_seed(
        team_a: Arc<Roster>,
        team_b: Arc<Roster>,
        config: MatchConfig,
        seed: u64,
    ) -> Result<Self> {
        let mut outcomes = SeededOutcomes::new(seed);
        let id = uuid::Builder::from_random_bytes(outcomes.random_bytes()).into_uuid();
        Self::build(id, team_a, team_b, config, Box::new(outcomes))
    }

    fn build(
        id: Uuid,
        team_a: Arc<Roster>,
        team_b: Arc<Roster>,
        config: MatchConfig,
        outcomes: Box<dyn OutcomeSource>,
    ) -> Result<Self> {
        config.validate()?;
        if team_a.name() == team_b.name() {
            return Err(MatchError::SameTeam(team_a.name().to_string()));
        }
        let first = InningsState::new(team_a.clone(), team_b.clone(), config)?;
        let second = InningsState::new(team_b.clone(), team_a.clone(), config)?;

        Ok(Self {
            id,
            title: format!("{} vs {}", team_a.name(), team_b.name()),
            venue: DEFAULT_VENUE.to_string(),
            config,
            team_a,
            team_b,
            first,
            second,
            target: None,
            outcome: None,
            result: String::new(),
            phase: MatchPhase::FirstInnings,
            outcomes,
        })
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    // ========================
    // Progression
    // ========================

    /// Bowl the next delivery of the match.
    ///
    /// Returns `None` once the match is finished; further calls change
    /// nothing.
    pub fn step(&mut self) -> Option<DeliveryEvent> {
        loop {
            match self.phase {
                MatchPhase::Finished => return None,
                MatchPhase::FirstInnings => {
                    let event = advance_one_ball(&mut self.first, self.outcomes.as_mut(), None);
                    if self.first.is_ended() {
                        self.close_first_innings();
                    }
                    if event.is_some() {
                        return event;
                    }
                }
                MatchPhase::SecondInnings => {
                    let event =
                        advance_one_ball(&mut self.second, self.outcomes.as_mut(), self.target);
                    if self.second.is_ended() {
                        self.conclude();
                    }
                    if event.is_some() {
                        return event;
                    }
                }
            }
        }
    }

    /// Play both innings to completion and return the result line.
    pub fn play_match(&mut self) -> &str {
        info!(match_id = %self.id, title = %self.title, "match started");
        while self.step().is_some() {}
        &self.result
    }

    fn close_first_innings(&mut self) {
        if self.first.end() == Some(InningsEnd::BowlerLimit) {
            let team = self.first.bowling_team().name().to_string();
            self.finish(MatchOutcome::BowlerLimit { team });
            return;
        }
        let target = self.first.total_runs() + 1;
        self.target = Some(target);
        self.phase = MatchPhase::SecondInnings;
        info!(
            match_id = %self.id,
            team = self.second.batting_team().name(),
            target,
            "second innings started"
        );
    }

    fn conclude(&mut self) {
        let target = self.target.unwrap_or(self.first.total_runs() + 1);
        let chasing = self.second.batting_team().name().to_string();
        let outcome = match self.second.end() {
            Some(InningsEnd::TargetReached { wickets_remaining }) => {
                MatchOutcome::ChaseWon { team: chasing, wickets: wickets_remaining }
            }
            _ if self.second.total_runs() >= target => MatchOutcome::ChaseWon {
                team: chasing,
                wickets: self.config.max_wickets.saturating_sub(self.second.wickets()),
            },
            _ => MatchOutcome::DefenceWon {
                team: self.first.batting_team().name().to_string(),
                runs: target - self.second.total_runs() - 1,
            },
        };
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: MatchOutcome) {
        self.result = outcome.to_string();
        self.outcome = Some(outcome);
        self.phase = MatchPhase::Finished;
        info!(match_id = %self.id, result = %self.result, "match ended");
    }

    // ========================
    // Read access
    // ========================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn team_a(&self) -> &Roster {
        &self.team_a
    }

    pub fn team_b(&self) -> &Roster {
        &self.team_b
    }

    pub fn first_innings(&self) -> &InningsState {
        &self.first
    }

    pub fn second_innings(&self) -> &InningsState {
        &self.second
    }

    /// Set once the first innings has ended (and the chase begins).
    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    /// Empty while the match is in progress.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == MatchPhase::Finished
    }

    /// Innings in play, or the last one played once the match is over.
    pub fn current_innings(&self) -> &InningsState {
        match self.phase {
            MatchPhase::FirstInnings => &self.first,
            MatchPhase::SecondInnings => &self.second,
            MatchPhase::Finished if self.target.is_some() => &self.second,
            MatchPhase::Finished => &self.first,
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let current = self.current_innings();
        MatchSnapshot {
            id: self.id,
            title: self.title.clone(),
            teams: [TeamScore::from(&self.first), TeamScore::from(&self.second)],
            venue: self.venue.clone(),
            overview: current.score_line(),
            live: LiveStats::from_innings(&self.title, current),
            phase: self.phase,
            target: self.target,
            result: self.result.clone(),
            match_ended: self.is_finished(),
        }
    }

    /// History entry for this match; meaningful once it has finished.
    pub fn record(&self) -> MatchRecord {
        MatchRecord {
            id: self.id,
            title: self.title.clone(),
            teams: [
                TeamTotal { team: self.team_a.name().to_string(), runs: self.first.total_runs() },
                TeamTotal { team: self.team_b.name().to_string(), runs: self.second.total_runs() },
            ],
            venue: self.venue.clone(),
            overview: self.first.score_line(),
            result: self.result.clone(),
            outcome: self.outcome.clone(),
            first_innings: InningsSummary::from(&self.first),
            second_innings: InningsSummary::from(&self.second),
            finished_at: None,
        }
    }
}
