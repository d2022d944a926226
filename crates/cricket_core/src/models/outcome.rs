use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::innings::MAX_BOWLERS_PER_INNINGS;

/// How a match was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MatchOutcome {
    /// Chasing side reached the target
    ChaseWon { team: String, wickets: u32 },
    /// Chasing side fell short
    DefenceWon { team: String, runs: u32 },
    /// Bowling side used too many bowlers; no winner
    BowlerLimit { team: String },
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<&str> {
        match self {
            MatchOutcome::ChaseWon { team, .. } | MatchOutcome::DefenceWon { team, .. } => {
                Some(team)
            }
            MatchOutcome::BowlerLimit { .. } => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchOutcome::ChaseWon { team, wickets } => {
                write!(f, "{team} wins by {wickets} wickets!")
            }
            MatchOutcome::DefenceWon { team, runs } => write!(f, "{team} wins by {runs} runs!"),
            MatchOutcome::BowlerLimit { team } => write!(
                f,
                "{team} cannot use more than {MAX_BOWLERS_PER_INNINGS} bowlers. Match cannot continue."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_strings() {
        let chase = MatchOutcome::ChaseWon { team: "India".into(), wickets: 7 };
        assert_eq!(chase.to_string(), "India wins by 7 wickets!");
        assert_eq!(chase.winner(), Some("India"));

        let defence = MatchOutcome::DefenceWon { team: "England".into(), runs: 12 };
        assert_eq!(defence.to_string(), "England wins by 12 runs!");

        let limit = MatchOutcome::BowlerLimit { team: "Australia".into() };
        assert_eq!(
            limit.to_string(),
            "Australia cannot use more than 5 bowlers. Match cannot continue."
        );
        assert_eq!(limit.winner(), None);
    }
}
