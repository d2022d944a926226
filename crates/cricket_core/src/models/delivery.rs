use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a single delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallOutcome {
    Runs(u32),
    Wicket,
}

/// Every outcome the random generator can produce, each equally likely.
pub const OUTCOME_TABLE: [BallOutcome; 7] = [
    BallOutcome::Runs(0),
    BallOutcome::Runs(1),
    BallOutcome::Runs(2),
    BallOutcome::Runs(3),
    BallOutcome::Runs(4),
    BallOutcome::Runs(6),
    BallOutcome::Wicket,
];

impl BallOutcome {
    /// Runs added to the total (0 for a wicket).
    pub fn runs(self) -> u32 {
        match self {
            BallOutcome::Runs(r) => r,
            BallOutcome::Wicket => 0,
        }
    }

    pub fn is_wicket(self) -> bool {
        matches!(self, BallOutcome::Wicket)
    }

    /// Batters cross on any odd number of runs.
    pub fn rotates_strike(self) -> bool {
        matches!(self, BallOutcome::Runs(r) if r % 2 == 1)
    }
}

impl fmt::Display for BallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BallOutcome::Runs(r) => write!(f, "{r}"),
            BallOutcome::Wicket => write!(f, "W"),
        }
    }
}

/// Ball-by-ball record of a processed delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEvent {
    /// 1-based ball number within the innings
    pub ball: u32,
    /// Overs bowled after this delivery, "o.b"
    pub overs: String,
    pub bowler: String,
    /// Batter who faced the delivery
    pub batter: String,
    pub outcome: BallOutcome,
    pub commentary: String,
}

impl DeliveryEvent {
    pub fn commentary_for(batter: &str, outcome: BallOutcome) -> String {
        match outcome {
            BallOutcome::Wicket => format!("{batter} is OUT!"),
            BallOutcome::Runs(r) => format!("{batter} scores {r} run(s)"),
        }
    }
}
