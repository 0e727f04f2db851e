//! Forecast parameters.
//!
//! Every field has a default; `SimulationConfig::default()` is the
//! baseline one-year forecast. There is no config file: callers build
//! the struct directly and the runner overrides a few fields from flags.

use crate::{
    error::{ForecastError, ForecastResult},
    types::Day,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub days: Day,
    pub trials: u64,
    pub initial_daily_users: u32,
    /// Average weekly growth from campus evangelism.
    pub weekly_growth_mean: f64,
    pub weekly_growth_std: f64,
    /// Proportion of users returning next week.
    pub retention_mean: f64,
    pub retention_std: f64,
    pub premium_conversion_mean: f64,
    pub premium_conversion_std: f64,
    pub premium_arpu_monthly: f64,
    pub analyses_per_user_mean: f64,
    pub analyses_per_user_std: f64,
    pub hours_saved_per_analysis: f64,
    /// Incremental placement probability per average daily user.
    pub internship_win_rate_uplift: f64,
    /// Daily noise std-dev as a fraction of the running user count.
    pub daily_noise_ratio: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days:                       365,
            trials:                     10_000,
            initial_daily_users:        60,
            weekly_growth_mean:         0.08,
            weekly_growth_std:          0.05,
            retention_mean:             0.88,
            retention_std:              0.04,
            premium_conversion_mean:    0.11,
            premium_conversion_std:     0.025,
            premium_arpu_monthly:       49.0,
            analyses_per_user_mean:     2.6,
            analyses_per_user_std:      0.5,
            hours_saved_per_analysis:   1.8,
            internship_win_rate_uplift: 0.12,
            daily_noise_ratio:          0.05,
        }
    }
}

impl SimulationConfig {
    /// Reject parameter bundles that would produce degenerate output.
    /// Called by the engine before any trial runs.
    pub fn validate(&self) -> ForecastResult<()> {
        if self.days == 0 {
            return Err(invalid("days", "must be greater than zero".into()));
        }
        if self.trials == 0 {
            return Err(invalid("trials", "must be greater than zero".into()));
        }

        let non_negative = [
            ("weekly_growth_std", self.weekly_growth_std),
            ("retention_std", self.retention_std),
            ("premium_conversion_std", self.premium_conversion_std),
            ("analyses_per_user_std", self.analyses_per_user_std),
            ("premium_arpu_monthly", self.premium_arpu_monthly),
            ("hours_saved_per_analysis", self.hours_saved_per_analysis),
            ("internship_win_rate_uplift", self.internship_win_rate_uplift),
            ("daily_noise_ratio", self.daily_noise_ratio),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be finite and non-negative, got {value}")));
            }
        }

        let finite = [
            ("weekly_growth_mean", self.weekly_growth_mean),
            ("retention_mean", self.retention_mean),
            ("premium_conversion_mean", self.premium_conversion_mean),
            ("analyses_per_user_mean", self.analyses_per_user_mean),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }

        Ok(())
    }

    /// Number of weekly compounding periods covering the horizon.
    pub fn weeks(&self) -> usize {
        self.days.div_ceil(crate::types::DAYS_PER_WEEK) as usize
    }
}

fn invalid(field: &'static str, reason: String) -> ForecastError {
    ForecastError::InvalidConfig { field, reason }
}
