//! Per-innings mutable state.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::engine::config::MatchConfig;
use crate::engine::stats::format_overs;
use crate::error::{MatchError, Result};
use crate::models::delivery::DeliveryEvent;
use crate::models::roster::{BowlingRotation, Roster};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatsmanStats {
    pub runs: u32,
    pub balls_faced: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerStats {
    pub runs_conceded: u32,
    pub wickets_taken: u32,
    pub balls_bowled: u32,
}

/// Why an innings finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum InningsEnd {
    AllOut,
    OversComplete,
    TargetReached { wickets_remaining: u32 },
    /// More distinct bowlers used than the per-innings limit allows
    BowlerLimit,
}

impl fmt::Display for InningsEnd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InningsEnd::AllOut => write!(f, "all out"),
            InningsEnd::OversComplete => write!(f, "overs complete"),
            InningsEnd::TargetReached { .. } => write!(f, "target reached"),
            InningsEnd::BowlerLimit => write!(f, "bowler limit exceeded"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsPhase {
    NotStarted,
    InProgress,
    Ended,
}

/// One side's turn at the crease.
///
/// Batters are tracked as indices into the batting roster's order. Stats maps
/// are keyed by player name and filled lazily through [`Self::batsman_mut`]
/// and [`Self::bowler_mut`].
#[derive(Debug, Clone)]
pub struct InningsState {
    pub(crate) config: MatchConfig,
    pub(crate) batting: Arc<Roster>,
    pub(crate) bowling: Arc<Roster>,
    pub(crate) rotation: BowlingRotation,
    pub(crate) total_runs: u32,
    pub(crate) wickets: u32,
    pub(crate) balls_bowled: u32,
    pub(crate) striker: Option<usize>,
    pub(crate) non_striker: Option<usize>,
    pub(crate) next_batsman_index: usize,
    pub(crate) bowler_one: Option<String>,
    pub(crate) bowler_two: Option<String>,
    pub(crate) batsman_stats: HashMap<String, BatsmanStats>,
    pub(crate) bowler_stats: HashMap<String, BowlerStats>,
    pub(crate) used_bowlers: HashSet<String>,
    pub(crate) end: Option<InningsEnd>,
    pub(crate) last_event: Option<DeliveryEvent>,
}

impl InningsState {
    /// Open an innings: first two batters at the crease, first bowler drawn
    /// from a fresh rotation.
    pub fn new(batting: Arc<Roster>, bowling: Arc<Roster>, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        if batting.name() == bowling.name() {
            return Err(MatchError::SameTeam(batting.name().to_string()));
        }
        let mut rotation = BowlingRotation::new();
        let bowler_one = rotation.next_bowler(&bowling).map(str::to_string);

        Ok(Self {
            config,
            batting,
            bowling,
            rotation,
            total_runs: 0,
            wickets: 0,
            balls_bowled: 0,
            striker: Some(0),
            non_striker: Some(1),
            next_batsman_index: 2,
            bowler_one,
            bowler_two: None,
            batsman_stats: HashMap::new(),
            bowler_stats: HashMap::new(),
            used_bowlers: HashSet::new(),
            end: None,
            last_event: None,
        })
    }

    // ========================
    // Lazy stats accessors
    // ========================

    /// Stats entry for the batter at `index`, created zeroed on first use.
    pub(crate) fn batsman_mut(&mut self, index: usize) -> &mut BatsmanStats {
        let name = self.batting.players()[index].clone();
        self.batsman_stats.entry(name).or_default()
    }

    /// Stats entry for `bowler`, created zeroed on first use.
    pub(crate) fn bowler_mut(&mut self, bowler: &str) -> &mut BowlerStats {
        self.bowler_stats.entry(bowler.to_string()).or_default()
    }

    pub(crate) fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    // ========================
    // Read access
    // ========================

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn batting_team(&self) -> &Roster {
        &self.batting
    }

    pub fn bowling_team(&self) -> &Roster {
        &self.bowling
    }

    pub fn total_runs(&self) -> u32 {
        self.total_runs
    }

    pub fn wickets(&self) -> u32 {
        self.wickets
    }

    pub fn balls_bowled(&self) -> u32 {
        self.balls_bowled
    }

    pub fn overs(&self) -> String {
        format_overs(self.balls_bowled, self.config.balls_per_over)
    }

    pub fn striker(&self) -> Option<&str> {
        self.striker.and_then(|i| self.batting.player(i))
    }

    pub fn non_striker(&self) -> Option<&str> {
        self.non_striker.and_then(|i| self.batting.player(i))
    }

    pub fn next_batsman_index(&self) -> usize {
        self.next_batsman_index
    }

    /// Bowler of the current over.
    pub fn bowler_one(&self) -> Option<&str> {
        self.bowler_one.as_deref()
    }

    /// Bowler of the previous over; `None` until an over has been completed.
    pub fn bowler_two(&self) -> Option<&str> {
        self.bowler_two.as_deref()
    }

    pub fn batsman(&self, name: &str) -> Option<&BatsmanStats> {
        self.batsman_stats.get(name)
    }

    pub fn bowler(&self, name: &str) -> Option<&BowlerStats> {
        self.bowler_stats.get(name)
    }

    pub fn used_bowlers(&self) -> &HashSet<String> {
        &self.used_bowlers
    }

    pub fn end(&self) -> Option<InningsEnd> {
        self.end
    }

    pub fn is_ended(&self) -> bool {
        self.end.is_some()
    }

    pub fn last_event(&self) -> Option<&DeliveryEvent> {
        self.last_event.as_ref()
    }

    pub fn phase(&self) -> InningsPhase {
        if self.end.is_some() {
            InningsPhase::Ended
        } else if self.balls_bowled == 0 {
            InningsPhase::NotStarted
        } else {
            InningsPhase::InProgress
        }
    }

    /// No more deliveries can be bowled: all out, no batter left to face, or
    /// overs used up.
    pub fn is_exhausted(&self) -> bool {
        self.is_all_out() || self.balls_bowled >= self.config.max_balls()
    }

    /// Wickets exhausted, or an end of the pitch left without a batter.
    pub(crate) fn is_all_out(&self) -> bool {
        self.wickets >= self.config.max_wickets
            || self.striker.is_none()
            || self.non_striker.is_none()
    }

    /// `"<team> <runs>/<wickets>"`
    pub fn score_line(&self) -> String {
        format!("{} {}/{}", self.batting.name(), self.total_runs, self.wickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> (Arc<Roster>, Arc<Roster>) {
        (
            Arc::new(Roster::from_strs("Home", &["A", "B", "C"], &["H1", "H2"]).unwrap()),
            Arc::new(Roster::from_strs("Away", &["D", "E", "F"], &["A1", "A2"]).unwrap()),
        )
    }

    #[test]
    fn test_opening_state() {
        let (home, away) = teams();
        let innings = InningsState::new(home, away, MatchConfig::default()).unwrap();
        assert_eq!(innings.striker(), Some("A"));
        assert_eq!(innings.non_striker(), Some("B"));
        assert_eq!(innings.next_batsman_index(), 2);
        assert_eq!(innings.bowler_one(), Some("A1"));
        assert_eq!(innings.bowler_two(), None);
        assert_eq!(innings.phase(), InningsPhase::NotStarted);
        assert_eq!(innings.score_line(), "Home 0/0");
        assert!(innings.used_bowlers().is_empty());
    }

    #[test]
    fn test_same_team_rejected() {
        let (home, _) = teams();
        let err = InningsState::new(home.clone(), home, MatchConfig::default()).unwrap_err();
        assert!(matches!(err, MatchError::SameTeam(_)));
    }

    #[test]
    fn test_lazy_stats_created_once() {
        let (home, away) = teams();
        let mut innings = InningsState::new(home, away, MatchConfig::default()).unwrap();
        assert!(innings.batsman("A").is_none());
        innings.batsman_mut(0).runs += 4;
        innings.batsman_mut(0).balls_faced += 1;
        assert_eq!(innings.batsman("A"), Some(&BatsmanStats { runs: 4, balls_faced: 1 }));

        innings.bowler_mut("A1").wickets_taken += 1;
        assert_eq!(innings.bowler("A1").map(|b| b.wickets_taken), Some(1));
    }

    #[test]
    fn test_swap_strike() {
        let (home, away) = teams();
        let mut innings = InningsState::new(home, away, MatchConfig::default()).unwrap();
        innings.swap_strike();
        assert_eq!(innings.striker(), Some("B"));
        assert_eq!(innings.non_striker(), Some("A"));
    }
}
