pub mod config;
pub mod innings;
pub mod match_sim;
pub mod outcome;
pub mod snapshot;
pub mod stats;

pub use config::{ManagerConfig, MatchConfig};
pub use innings::{advance_one_ball, play_innings, MAX_BOWLERS_PER_INNINGS};
pub use match_sim::CricketMatch;
pub use outcome::{OutcomeSource, ScriptedOutcomes, SeededOutcomes};
pub use snapshot::{BatterLine, BowlerLine, LiveStats, MatchPhase, MatchSnapshot, TeamScore};
