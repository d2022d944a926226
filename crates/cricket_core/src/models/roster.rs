//! Team rosters and bowling rotation.
//!
//! A [`Roster`] is reference data: it is built once, validated, and then
//! shared between matches behind an `Arc`. The bowling rotation cursor is
//! kept outside the roster in a [`BowlingRotation`] owned by each innings, so
//! one roster can back any number of matches at the same time.

use serde::Serialize;

use crate::error::{MatchError, Result};

/// Minimum number of batters needed to open an innings.
pub const MIN_BATTERS: usize = 2;

/// Static team definition: name, batting order and bowling rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    name: String,
    players: Vec<String>,
    bowlers: Vec<String>,
}

impl Roster {
    /// Build a roster, failing fast on malformed team data.
    ///
    /// The bowling rotation may be longer than the per-innings bowler limit;
    /// that limit is enforced by the innings engine while the innings runs.
    pub fn new(
        name: impl Into<String>,
        players: Vec<String>,
        bowlers: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MatchError::roster(&name, "team name is empty"));
        }
        if players.len() < MIN_BATTERS {
            return Err(MatchError::roster(
                &name,
                format!("need at least {MIN_BATTERS} batters, found {}", players.len()),
            ));
        }
        if bowlers.is_empty() {
            return Err(MatchError::roster(&name, "bowling rotation is empty"));
        }
        Ok(Self { name, players, bowlers })
    }

    /// Convenience constructor from string slices.
    pub fn from_strs(name: &str, players: &[&str], bowlers: &[&str]) -> Result<Self> {
        Self::new(
            name,
            players.iter().map(|p| p.to_string()).collect(),
            bowlers.iter().map(|b| b.to_string()).collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Batting order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn bowlers(&self) -> &[String] {
        &self.bowlers
    }

    pub fn player(&self, index: usize) -> Option<&str> {
        self.players.get(index).map(String::as_str)
    }
}

/// Per-innings cursor into a roster's bowling rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BowlingRotation {
    cursor: usize,
}

impl BowlingRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the bowler at `cursor mod len` and advance the cursor.
    ///
    /// `None` only for an empty rotation, which [`Roster::new`] rejects.
    pub fn next_bowler<'a>(&mut self, roster: &'a Roster) -> Option<&'a str> {
        if roster.bowlers.is_empty() {
            return None;
        }
        let bowler = &roster.bowlers[self.cursor % roster.bowlers.len()];
        self.cursor += 1;
        Some(bowler.as_str())
    }

    /// Number of times the rotation has been advanced.
    pub fn calls(&self) -> usize {
        self.cursor
    }
}
