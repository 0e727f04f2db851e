//! Monte Carlo usage forecast for PitchGuard.
//!
//! Projects one year of adoption, analyst time saved and premium revenue
//! over many independently seeded trials, then summarises each metric as
//! mean / p10 / p90. The `search` module holds the contract for the
//! research-fallback search API.

pub mod config;
pub mod engine;
pub mod error;
pub mod metric;
pub mod report;
pub mod rng;
pub mod search;
pub mod stats;
pub mod trial;
pub mod types;

pub use config::SimulationConfig;
pub use engine::{run_simulation, ExecutionMode, ForecastEngine, ForecastSummary, DEFAULT_SEED};
pub use error::{ForecastError, ForecastResult};
pub use metric::Metric;
pub use report::format_summary;
pub use stats::{percentile, SummaryStats};
pub use trial::{run_trial, SimulationResult};
