use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid roster '{team}': {reason}")]
    InvalidRoster { team: String, reason: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("A team cannot play against itself: {0}")]
    SameTeam(String),

    #[error("Need at least two teams to schedule a match, found {found}")]
    NotEnoughTeams { found: usize },

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    pub(crate) fn roster(team: &str, reason: impl Into<String>) -> Self {
        MatchError::InvalidRoster { team: team.to_string(), reason: reason.into() }
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            MatchError::Deserialization(err.to_string())
        } else {
            MatchError::Serialization(err.to_string())
        }
    }
}

/// Failure reported by a [`crate::publish::SnapshotPublisher`].
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Subscriber channel disconnected for subject '{subject}'")]
    Disconnected { subject: String },

    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
