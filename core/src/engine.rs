//! The forecast engine: runs every trial and folds the results.
//!
//! RULES:
//!   - The config is validated before the first trial; an invalid config
//!     runs nothing.
//!   - Trial i always draws from RNG stream i, whatever the execution mode.
//!   - Any failure is fatal to the whole run. There are no partial results.

use crate::{
    config::SimulationConfig,
    error::ForecastResult,
    metric::Metric,
    rng::RngBank,
    stats::{summarise, SummaryStats},
    trial::{run_trial, SimulationResult},
    types::{Day, TrialIndex},
};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

/// Per-metric summaries of a run, in `Metric::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub days:    Day,
    pub trials:  u64,
    pub seed:    u64,
    pub metrics: Vec<MetricSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: Metric,
    #[serde(flatten)]
    pub stats:  SummaryStats,
}

impl ForecastSummary {
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &SummaryStats)> {
        self.metrics.iter().map(|m| (m.metric, &m.stats))
    }
}

pub struct ForecastEngine {
    pub config:   SimulationConfig,
    pub rng_bank: RngBank,
    mode:         ExecutionMode,
}

impl ForecastEngine {
    /// Build an engine. Fails if the config is invalid.
    pub fn new(config: SimulationConfig, seed: u64) -> ForecastResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng_bank: RngBank::new(seed),
            mode: ExecutionMode::Sequential,
        })
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Run a single trial on its own stream.
    pub fn trial(&self, index: TrialIndex) -> SimulationResult {
        let mut rng = self.rng_bank.for_trial(index);
        run_trial(&self.config, &mut rng)
    }

    /// Run every trial and return the raw per-trial results in index order.
    pub fn run_trials(&self) -> Vec<SimulationResult> {
        let trials = self.config.trials;
        match self.mode {
            ExecutionMode::Sequential => (0..trials).map(|i| self.trial(i)).collect(),
            ExecutionMode::Parallel => (0..trials).into_par_iter().map(|i| self.trial(i)).collect(),
        }
    }

    /// Run every trial and summarise each metric.
    pub fn run(&self) -> ForecastSummary {
        log::info!(
            "forecast: trials={} days={} seed={} mode={:?}",
            self.config.trials,
            self.config.days,
            self.rng_bank.master_seed(),
            self.mode
        );

        let results = self.run_trials();
        let summary = aggregate(&results, &self.config, self.rng_bank.master_seed());

        for (metric, stats) in summary.iter() {
            log::debug!(
                "forecast: {} mean={:.3} p10={:.3} p90={:.3}",
                metric.name(),
                stats.mean,
                stats.p10,
                stats.p90
            );
        }
        log::info!("forecast: complete, {} trials summarised", results.len());

        summary
    }
}

/// Fold per-trial results into one summary per metric.
pub fn aggregate(
    results: &[SimulationResult],
    config: &SimulationConfig,
    seed: u64,
) -> ForecastSummary {
    let metrics = Metric::ALL
        .iter()
        .map(|&metric| MetricSummary {
            metric,
            stats: summarise(results.iter().map(|r| r.get(metric)).collect()),
        })
        .collect();

    ForecastSummary {
        days: config.days,
        trials: results.len() as u64,
        seed,
        metrics,
    }
}

/// Validate `config`, run every trial sequentially and summarise.
pub fn run_simulation(config: &SimulationConfig, seed: u64) -> ForecastResult<ForecastSummary> {
    let engine = ForecastEngine::new(config.clone(), seed)?;
    Ok(engine.run())
}
