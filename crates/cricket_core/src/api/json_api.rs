use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::engine::config::MatchConfig;
use crate::engine::match_sim::CricketMatch;
use crate::engine::snapshot::MatchSnapshot;
use crate::error::{MatchError, Result};
use crate::models::history::MatchRecord;
use crate::models::roster::Roster;
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Bats first
    pub team_a: TeamData,
    pub team_b: TeamData,
    #[serde(default)]
    pub config: Option<MatchConfig>,
    #[serde(default)]
    pub venue: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamData {
    pub name: String,
    pub players: Vec<String>,
    pub bowlers: Vec<String>,
}

impl TeamData {
    pub fn into_roster(self) -> Result<Roster> {
        Roster::new(self.name, self.players, self.bowlers)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub match_id: Uuid,
    pub result: String,
    pub snapshot: MatchSnapshot,
    pub record: MatchRecord,
}

/// Simulate a full match from a JSON request and return a JSON response.
///
/// The seed fixes every delivery and the match id, so identical requests
/// produce identical responses.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = simulate_match(request)?;
    Ok(serde_json::to_string(&response)?)
}

pub fn simulate_match(request: MatchRequest) -> Result<MatchResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(MatchError::UnsupportedSchema {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    let config = request.config.unwrap_or_default();
    let team_a = Arc::new(request.team_a.into_roster()?);
    let team_b = Arc::new(request.team_b.into_roster()?);

    let mut game = CricketMatch::with_seed(team_a, team_b, config, request.seed)?;
    if let Some(venue) = request.venue {
        game = game.with_venue(venue);
    }
    game.play_match();

    Ok(MatchResponse {
        schema_version: SCHEMA_VERSION,
        match_id: game.id(),
        result: game.result().to_string(),
        snapshot: game.snapshot(),
        record: game.record(),
    })
}
