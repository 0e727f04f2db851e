//! One stochastic year of adoption and usage.
//!
//! A trial walks the horizon day by day:
//!   1. Growth and retention are drawn once per week, up front.
//!   2. On each week boundary after day 0 the running user count is
//!      multiplied by (1 + growth), then by retention.
//!   3. Every day gets independent noise on top of the running count,
//!      floored at MIN_DAILY_USERS. The noise is recorded, never carried.
//!
//! Downstream metrics then mix cumulative volume (analyses, hours) with
//! flow rates over the average day (premium users, ARR, offers).

use crate::{
    config::SimulationConfig,
    metric::Metric,
    rng::TrialRng,
    types::{Day, DAYS_PER_WEEK},
};
use serde::{Deserialize, Serialize};

/// Residual activity floor for any single day.
pub const MIN_DAILY_USERS: f64 = 5.0;
pub const RETENTION_BOUNDS: (f64, f64) = (0.4, 0.98);
pub const PREMIUM_CONVERSION_BOUNDS: (f64, f64) = (0.02, 0.30);
pub const MIN_ANALYSES_PER_USER: f64 = 0.5;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Outcome of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_analyses:           f64,
    pub total_hours_saved:        f64,
    pub annual_recurring_revenue: f64,
    pub premium_users:            f64,
    pub internship_offers_delta:  f64,
    pub daily_user_peak:          f64,
}

impl SimulationResult {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalAnalyses          => self.total_analyses,
            Metric::TotalHoursSaved        => self.total_hours_saved,
            Metric::AnnualRecurringRevenue => self.annual_recurring_revenue,
            Metric::PremiumUsers           => self.premium_users,
            Metric::InternshipOffersDelta  => self.internship_offers_delta,
            Metric::DailyUserPeak          => self.daily_user_peak,
        }
    }
}

/// Per-week multipliers drawn at the start of a trial.
#[derive(Debug, Clone)]
pub struct WeeklyDraws {
    pub growth:    Vec<f64>,
    pub retention: Vec<f64>,
}

impl WeeklyDraws {
    pub fn draw(config: &SimulationConfig, rng: &mut TrialRng) -> Self {
        let weeks = config.weeks();
        let growth = (0..weeks)
            .map(|_| rng.gauss(config.weekly_growth_mean, config.weekly_growth_std))
            .collect();
        let (lower, upper) = RETENTION_BOUNDS;
        let retention = (0..weeks)
            .map(|_| rng.bounded_gauss(config.retention_mean, config.retention_std, lower, upper))
            .collect();
        Self { growth, retention }
    }
}

/// Simulate the daily active-user series for one trial.
/// Returns one floored, noised value per day of the horizon.
pub fn simulate_daily_users(config: &SimulationConfig, rng: &mut TrialRng) -> Vec<f64> {
    let draws = WeeklyDraws::draw(config, rng);
    let last_week = draws.growth.len().saturating_sub(1);

    let mut daily_users = Vec::with_capacity(config.days as usize);
    let mut current_users = f64::from(config.initial_daily_users);

    for day in 0..config.days {
        if day > 0 && day % DAYS_PER_WEEK == 0 {
            let week = week_index(day).min(last_week);
            current_users *= 1.0 + draws.growth[week];
            current_users *= draws.retention[week];
        }
        let noise = rng.gauss(0.0, current_users * config.daily_noise_ratio);
        daily_users.push((current_users + noise).max(MIN_DAILY_USERS));
    }

    daily_users
}

/// Run one full trial and derive its six metrics.
pub fn run_trial(config: &SimulationConfig, rng: &mut TrialRng) -> SimulationResult {
    let daily_users = simulate_daily_users(config, rng);
    let days = f64::from(config.days);

    // User-days, not unique users: repeat usage is counted every day.
    let total_users: f64 = daily_users.iter().sum();
    let average_daily_users = total_users / days;

    let analyses_per_user = rng
        .gauss(config.analyses_per_user_mean, config.analyses_per_user_std)
        .max(MIN_ANALYSES_PER_USER);
    let total_analyses = analyses_per_user * total_users;
    let total_hours_saved = total_analyses * config.hours_saved_per_analysis;

    let (lower, upper) = PREMIUM_CONVERSION_BOUNDS;
    let premium_conversion = rng.bounded_gauss(
        config.premium_conversion_mean,
        config.premium_conversion_std,
        lower,
        upper,
    );
    let premium_users = premium_conversion * average_daily_users;
    let annual_recurring_revenue = premium_users * config.premium_arpu_monthly * MONTHS_PER_YEAR;

    let internship_offers_delta = average_daily_users * config.internship_win_rate_uplift;

    let daily_user_peak = daily_users.iter().copied().fold(f64::MIN, f64::max);

    SimulationResult {
        total_analyses,
        total_hours_saved,
        annual_recurring_revenue,
        premium_users,
        internship_offers_delta,
        daily_user_peak,
    }
}

fn week_index(day: Day) -> usize {
    (day / DAYS_PER_WEEK) as usize
}
