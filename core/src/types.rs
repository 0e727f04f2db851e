//! Shared primitive types used across the forecast.

/// A simulated day. Day 0 is the first day of the horizon.
pub type Day = u32;

/// Index of a single trial within a run. Also selects its RNG stream.
pub type TrialIndex = u64;

/// Days per compounding period. Growth and retention apply once per week.
pub const DAYS_PER_WEEK: Day = 7;
