//! Completed-match records kept by the match manager.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::innings::InningsState;
use crate::models::outcome::MatchOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotal {
    pub team: String,
    pub runs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsSummary {
    pub batting_team: String,
    pub runs: u32,
    pub wickets: u32,
    /// "o.b"
    pub overs: String,
}

impl From<&InningsState> for InningsSummary {
    fn from(innings: &InningsState) -> Self {
        Self {
            batting_team: innings.batting_team().name().to_string(),
            runs: innings.total_runs(),
            wickets: innings.wickets(),
            overs: innings.overs(),
        }
    }
}

/// History entry for one finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub title: String,
    pub teams: [TeamTotal; 2],
    pub venue: String,
    /// Score line of the side that batted first
    pub overview: String,
    pub result: String,
    pub outcome: Option<MatchOutcome>,
    pub first_innings: InningsSummary,
    pub second_innings: InningsSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    pub fn with_finished_at(mut self, at: DateTime<Utc>) -> Self {
        self.finished_at = Some(at);
        self
    }
}
