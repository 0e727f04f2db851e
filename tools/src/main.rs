//! forecast-runner: headless Monte Carlo usage forecast.
//!
//! Usage:
//!   forecast-runner
//!   forecast-runner --seed 12345 --trials 1000 --days 180
//!   forecast-runner --parallel --json

use anyhow::{bail, Context, Result};
use forecast_core::{
    engine::{ExecutionMode, ForecastEngine, DEFAULT_SEED},
    report::{format_summary, render_json},
    SimulationConfig,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = SimulationConfig::default();

    let seed = parse_arg(&args, "--seed", DEFAULT_SEED)?;
    config.trials = parse_arg(&args, "--trials", config.trials)?;
    config.days = parse_arg(&args, "--days", config.days)?;
    let json = args.iter().any(|a| a == "--json");
    let mode = if args.iter().any(|a| a == "--parallel") {
        ExecutionMode::Parallel
    } else {
        ExecutionMode::Sequential
    };

    let engine = ForecastEngine::new(config, seed)
        .context("refusing to run forecast")?
        .with_mode(mode);
    let summary = engine.run();

    if json {
        println!("{}", render_json(&summary)?);
    } else {
        println!("{}", format_summary(&summary));
    }

    Ok(())
}

/// Value following `flag`, or `default` when the flag is absent.
/// A flag with a missing or unparseable value is an error.
fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(default);
    };
    let Some(raw) = args.get(pos + 1) else {
        bail!("{flag} requires a value");
    };
    raw.parse()
        .map_err(|e| anyhow::anyhow!("invalid value for {flag}: {raw:?} ({e})"))
}
