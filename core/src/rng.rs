//! Deterministic random number generation.
//!
//! RULE: Nothing in the forecast may call any platform RNG.
//! All randomness flows through TrialRng instances derived
//! from the single master seed of the run.
//!
//! Each trial gets its own RNG stream, seeded deterministically
//! from (master_seed XOR trial_index). This means:
//!   - A trial's draws never depend on how many trials ran before it.
//!   - Sequential and parallel runs with the same seed are identical.

use crate::types::TrialIndex;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG for a single trial.
pub struct TrialRng {
    inner: Pcg64Mcg,
}

impl TrialRng {
    /// Create a trial RNG from the master seed and the trial index.
    pub fn new(master_seed: u64, trial: TrialIndex) -> Self {
        let derived_seed = master_seed ^ (trial.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Draw a standard normal variate (mean 0, std 1).
    pub fn standard_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Draw from Normal(mean, std_dev).
    ///
    /// Computed as `mean + std_dev * z`, so a zero std-dev returns `mean`
    /// exactly and a negative one mirrors the draw instead of failing.
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Draw from Normal(mean, std_dev), then clamp into `[lower, upper]`.
    ///
    /// Out-of-range draws saturate at the bound; nothing is resampled.
    pub fn bounded_gauss(&mut self, mean: f64, std_dev: f64, lower: f64, upper: f64) -> f64 {
        self.gauss(mean, std_dev).max(lower).min(upper)
    }
}

/// Hands out per-trial RNG streams for a single run.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_trial(&self, trial: TrialIndex) -> TrialRng {
        TrialRng::new(self.master_seed, trial)
    }
}
