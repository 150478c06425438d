//! Placeholder analysis outcome.
//!
//! The photo is never inspected: an analysis run picks one category uniformly
//! at random. Callers that need determinism inject a seeded RNG or a
//! [`FixedOutcome`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::DiagnosisCategory;

/// Draw one category uniformly from all variants.
pub fn select_outcome<R: Rng + ?Sized>(rng: &mut R) -> DiagnosisCategory {
    let index = rng.random_range(0..DiagnosisCategory::ALL.len());
    DiagnosisCategory::ALL[index]
}

/// Supplies the diagnosis for a finished analysis run.
///
/// Called exactly once per run; every call is independent.
pub trait OutcomeSource {
    fn next_outcome(&mut self) -> DiagnosisCategory;
}

/// Uniform random outcomes backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomOutcome<R = StdRng> {
    rng: R,
}

impl RandomOutcome<StdRng> {
    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomOutcome<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OutcomeSource for RandomOutcome<R> {
    fn next_outcome(&mut self) -> DiagnosisCategory {
        select_outcome(&mut self.rng)
    }
}

/// Always yields the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOutcome(pub DiagnosisCategory);

impl OutcomeSource for FixedOutcome {
    fn next_outcome(&mut self) -> DiagnosisCategory {
        self.0
    }
}

impl<T: OutcomeSource + ?Sized> OutcomeSource for Box<T> {
    fn next_outcome(&mut self) -> DiagnosisCategory {
        (**self).next_outcome()
    }
}
