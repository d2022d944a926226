//! Read-only match projections for publishing and polling.
//!
//! A [`MatchSnapshot`] is an owned copy; building one never touches match
//! state, and consumers can serialize it freely.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::stats::{economy, format_overs, run_rate, strike_rate};
use crate::error::{MatchError, Result};
use crate::models::innings::InningsState;

/// Where the match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    FirstInnings,
    SecondInnings,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub team: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: String,
}

impl From<&InningsState> for TeamScore {
    fn from(innings: &InningsState) -> Self {
        Self {
            team: innings.batting_team().name().to_string(),
            runs: innings.total_runs(),
            wickets: innings.wickets(),
            overs: innings.overs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterLine {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub strike_rate: String,
}

impl BatterLine {
    fn from_innings(innings: &InningsState, name: &str) -> Self {
        let stats = innings.batsman(name).copied().unwrap_or_default();
        Self {
            name: name.to_string(),
            runs: stats.runs,
            balls: stats.balls_faced,
            strike_rate: strike_rate(stats.runs, stats.balls_faced),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerLine {
    pub name: String,
    pub overs: String,
    pub runs: u32,
    pub wickets: u32,
    pub economy: String,
}

impl BowlerLine {
    fn from_innings(innings: &InningsState, name: &str) -> Self {
        let stats = innings.bowler(name).copied().unwrap_or_default();
        let balls_per_over = innings.config().balls_per_over;
        Self {
            name: name.to_string(),
            overs: format_overs(stats.balls_bowled, balls_per_over),
            runs: stats.runs_conceded,
            wickets: stats.wickets_taken,
            economy: economy(stats.runs_conceded, stats.balls_bowled, balls_per_over),
        }
    }
}

/// Ball-by-ball view of the innings in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStats {
    pub title: String,
    /// Commentary for the latest delivery
    pub update: String,
    pub live_score: String,
    pub run_rate: String,
    /// Striker
    pub batsman_one: Option<BatterLine>,
    /// Non-striker
    pub batsman_two: Option<BatterLine>,
    /// Current over's bowler
    pub bowler_one: Option<BowlerLine>,
    /// Previous over's bowler
    pub bowler_two: Option<BowlerLine>,
}

impl LiveStats {
    pub(crate) fn from_innings(title: &str, innings: &InningsState) -> Self {
        let balls_per_over = innings.config().balls_per_over;
        Self {
            title: format!("{title}, Live Cricket Score"),
            update: innings.last_event().map(|e| e.commentary.clone()).unwrap_or_default(),
            live_score: innings.score_line(),
            run_rate: run_rate(innings.total_runs(), innings.balls_bowled(), balls_per_over),
            batsman_one: innings.striker().map(|n| BatterLine::from_innings(innings, n)),
            batsman_two: innings.non_striker().map(|n| BatterLine::from_innings(innings, n)),
            bowler_one: innings.bowler_one().map(|n| BowlerLine::from_innings(innings, n)),
            bowler_two: innings.bowler_two().map(|n| BowlerLine::from_innings(innings, n)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub id: Uuid,
    pub title: String,
    /// Batting-first side, then chasing side
    pub teams: [TeamScore; 2],
    pub venue: String,
    /// Score line of the innings in play
    pub overview: String,
    pub live: LiveStats,
    pub phase: MatchPhase,
    pub target: Option<u32>,
    /// Empty until the match is decided
    pub result: String,
    pub match_ended: bool,
}

impl MatchSnapshot {
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| MatchError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::MatchConfig;
    use crate::engine::match_sim::CricketMatch;
    use crate::models::roster::Roster;
    use std::sync::Arc;

    fn team(name: &str) -> Arc<Roster> {
        let players: Vec<String> = (1..=11).map(|i| format!("{name} {i}")).collect();
        let bowlers = players[6..].to_vec();
        Arc::new(Roster::new(name, players, bowlers).unwrap())
    }

    #[test]
    fn test_json_value_roundtrip() {
        let mut game =
            CricketMatch::with_seed(team("A"), team("B"), MatchConfig::default(), 5).unwrap();
        game.step();
        let snapshot = game.snapshot();

        let value = snapshot.to_json_value().unwrap();
        assert_eq!(value["phase"], "first_innings");
        let back = MatchSnapshot::from_json(&value.to_string()).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_from_json_reports_crate_error() {
        let err = MatchSnapshot::from_json(r#"{"id": "not-a-uuid"}"#).unwrap_err();
        assert!(matches!(err, MatchError::Deserialization(_)));
    }
}
