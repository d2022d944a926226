//! Ball outcome generation.
//!
//! The only randomness in a match comes through [`OutcomeSource`]. The
//! production source draws uniformly from [`OUTCOME_TABLE`] with a seeded
//! ChaCha8 generator, so a seed fully determines a match.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::delivery::{BallOutcome, OUTCOME_TABLE};

pub trait OutcomeSource: Send + Sync {
    fn next_outcome(&mut self) -> BallOutcome;
}

/// Uniform draws from the outcome table.
#[derive(Debug, Clone)]
pub struct SeededOutcomes {
    rng: ChaCha8Rng,
}

impl SeededOutcomes {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    /// Raw random bytes for derived identifiers (match ids).
    pub(crate) fn random_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }
}

impl OutcomeSource for SeededOutcomes {
    fn next_outcome(&mut self) -> BallOutcome {
        OUTCOME_TABLE[self.rng.gen_range(0..OUTCOME_TABLE.len())]
    }
}

/// Replays a fixed sequence, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedOutcomes {
    script: Vec<BallOutcome>,
    position: usize,
}

impl ScriptedOutcomes {
    /// An empty script behaves like a stream of dot balls.
    pub fn new(script: Vec<BallOutcome>) -> Self {
        Self { script, position: 0 }
    }

    /// The same outcome on every delivery.
    pub fn constant(outcome: BallOutcome) -> Self {
        Self::new(vec![outcome])
    }

    pub fn drawn(&self) -> usize {
        self.position
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn next_outcome(&mut self) -> BallOutcome {
        if self.script.is_empty() {
            return BallOutcome::Runs(0);
        }
        let outcome = self.script[self.position % self.script.len()];
        self.position += 1;
        outcome
    }
}
