//! Human-readable and JSON renderings of a forecast summary.

use crate::{
    engine::ForecastSummary,
    error::ForecastResult,
    stats::SummaryStats,
};

pub const REPORT_TITLE: &str = "PitchGuard Monte Carlo Usage Forecast";
pub const RULE_WIDTH: usize = 66;

/// Means at or above this render as whole numbers.
pub const WHOLE_NUMBER_THRESHOLD: f64 = 100.0;

/// Render the summary as a two-line header plus one line per metric.
pub fn format_summary(summary: &ForecastSummary) -> String {
    let mut lines = Vec::with_capacity(summary.metrics.len() + 2);
    lines.push(format!(
        "{REPORT_TITLE} ({} horizon, {} trials)",
        horizon_label(summary.days),
        group_thousands(&summary.trials.to_string())
    ));
    lines.push("-".repeat(RULE_WIDTH));

    for (metric, stats) in summary.iter() {
        lines.push(format_metric_line(&metric.title(), stats));
    }
    lines.join("\n")
}

/// `{name}: mean=.., p10=.., p90=..` with the precision picked by the mean.
pub fn format_metric_line(name: &str, stats: &SummaryStats) -> String {
    let decimals = if stats.mean >= WHOLE_NUMBER_THRESHOLD { 0 } else { 1 };
    format!(
        "{name}: mean={}, p10={}, p90={}",
        format_grouped(stats.mean, decimals),
        format_grouped(stats.p10, decimals),
        format_grouped(stats.p90, decimals)
    )
}

/// Fixed-point rendering with comma thousands separators.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{value:.decimals$}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };
    let mut out = format!("{sign}{}", group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Insert a comma every three digits from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn horizon_label(days: u32) -> String {
    if days == 365 {
        "1-year".to_string()
    } else {
        format!("{days}-day")
    }
}

/// Pretty-printed JSON for machine consumers.
pub fn render_json(summary: &ForecastSummary) -> ForecastResult<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
