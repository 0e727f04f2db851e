//! The six forecast metrics.

use serde::{Deserialize, Serialize};

/// Output metrics in report order.
/// NEVER reorder: the report and JSON output list metrics in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalAnalyses,
    TotalHoursSaved,
    AnnualRecurringRevenue,
    PremiumUsers,
    InternshipOffersDelta,
    DailyUserPeak,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::TotalAnalyses,
        Metric::TotalHoursSaved,
        Metric::AnnualRecurringRevenue,
        Metric::PremiumUsers,
        Metric::InternshipOffersDelta,
        Metric::DailyUserPeak,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TotalAnalyses          => "total_analyses",
            Self::TotalHoursSaved        => "total_hours_saved",
            Self::AnnualRecurringRevenue => "annual_recurring_revenue",
            Self::PremiumUsers           => "premium_users",
            Self::InternshipOffersDelta  => "internship_offers_delta",
            Self::DailyUserPeak          => "daily_user_peak",
        }
    }

    /// Display name: snake identifier in Title Case with spaces.
    pub fn title(&self) -> String {
        title_case(self.name())
    }
}

/// "annual_recurring_revenue" -> "Annual Recurring Revenue".
pub fn title_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
