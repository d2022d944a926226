//! # cricket_core - Limited-Overs Cricket Match Simulation Engine
//!
//! Ball-by-ball simulation of a two-innings limited-overs match, plus a
//! continuous runner that plays match after match and publishes live
//! snapshots.
//!
//! ## Features
//! - Deterministic simulation (same seed = same match)
//! - Per-batter and per-bowler figures with strike rate and economy
//! - Read-only snapshots that are safe to take between any two deliveries
//! - JSON API and a pluggable snapshot publisher

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod manager;
pub mod models;
pub mod publish;

// Re-export main API
pub use api::{simulate_match_json, MatchRequest, MatchResponse, TeamData};
pub use data::{default_teams, find_team};
pub use engine::{
    advance_one_ball, CricketMatch, ManagerConfig, MatchConfig, MatchPhase, MatchSnapshot,
    OutcomeSource, ScriptedOutcomes, SeededOutcomes,
};
pub use error::{MatchError, PublishError, Result};
pub use manager::MatchManager;
pub use models::{
    BallOutcome, DeliveryEvent, InningsEnd, InningsState, MatchOutcome, MatchRecord, Roster,
};
pub use publish::{ChannelPublisher, LogPublisher, NullPublisher, SnapshotPublisher};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team_json(name: &str) -> serde_json::Value {
        let players: Vec<String> = (1..=11).map(|i| format!("{name} {i}")).collect();
        let bowlers: Vec<String> = players[6..].to_vec();
        json!({ "name": name, "players": players, "bowlers": bowlers })
    }

    fn request(seed: u64) -> String {
        json!({
            "schema_version": 1,
            "seed": seed,
            "team_a": team_json("Home"),
            "team_b": team_json("Away"),
        })
        .to_string()
    }

    #[test]
    fn test_basic_simulation() {
        let result = simulate_match_json(&request(42));
        assert!(result.is_ok(), "Simulation should succeed");

        let parsed: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["snapshot"]["match_ended"], true);
        assert_eq!(parsed["snapshot"]["title"], "Home vs Away");
        let result = parsed["result"].as_str().unwrap();
        assert!(result.contains(" wins by "), "unexpected result: {result}");
        assert_eq!(parsed["record"]["result"], parsed["result"]);
    }

    #[test]
    fn test_determinism() {
        let first = simulate_match_json(&request(999)).unwrap();
        let second = simulate_match_json(&request(999)).unwrap();
        assert_eq!(first, second, "Same seed should produce same result");
    }

    #[test]
    fn test_rejects_unknown_schema() {
        let body = request(1).replace("\"schema_version\":1", "\"schema_version\":9");
        let err = simulate_match_json(&body).unwrap_err();
        assert!(matches!(err, MatchError::UnsupportedSchema { found: 9, expected: 1 }));
    }

    #[test]
    fn test_rejects_bad_roster() {
        let body = json!({
            "schema_version": 1,
            "seed": 1,
            "team_a": { "name": "Short", "players": ["Only"], "bowlers": ["Only"] },
            "team_b": team_json("Away"),
        })
        .to_string();
        assert!(matches!(simulate_match_json(&body), Err(MatchError::InvalidRoster { .. })));
    }

    #[test]
    fn test_rejects_overflowing_config() {
        let body = json!({
            "schema_version": 1,
            "seed": 1,
            "team_a": team_json("Home"),
            "team_b": team_json("Away"),
            "config": { "total_overs": u32::MAX, "balls_per_over": 6 },
        })
        .to_string();
        assert!(matches!(simulate_match_json(&body), Err(MatchError::InvalidConfig(_))));
    }

    #[test]
    fn test_custom_config_respected() {
        let body = json!({
            "schema_version": 1,
            "seed": 3,
            "team_a": team_json("Home"),
            "team_b": team_json("Away"),
            "config": { "total_overs": 5 },
            "venue": "at Eden Gardens",
        })
        .to_string();
        let parsed: serde_json::Value =
            serde_json::from_str(&simulate_match_json(&body).unwrap()).unwrap();
        assert_eq!(parsed["record"]["venue"], "at Eden Gardens");
        let first_overs = parsed["record"]["first_innings"]["overs"].as_str().unwrap();
        let whole: u32 = first_overs.split('.').next().unwrap().parse().unwrap();
        assert!(whole <= 5);
    }
}
