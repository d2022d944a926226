pub mod delivery;
pub mod history;
pub mod innings;
pub mod outcome;
pub mod roster;

pub use delivery::{BallOutcome, DeliveryEvent, OUTCOME_TABLE};
pub use history::{InningsSummary, MatchRecord, TeamTotal};
pub use innings::{BatsmanStats, BowlerStats, InningsEnd, InningsPhase, InningsState};
pub use outcome::MatchOutcome;
pub use roster::{BowlingRotation, Roster};
