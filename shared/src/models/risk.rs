//! Risk factor models

use serde::{Deserialize, Serialize};

/// The five risk categories reported with every forecast
///
/// The set is fixed: a report always carries all five, even when a category
/// is in a no-alert state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskCategory {
    Weather,
    #[serde(rename = "Market Price")]
    MarketPrice,
    #[serde(rename = "Pest/Disease")]
    PestDisease,
    #[serde(rename = "Input Costs")]
    InputCosts,
    Labor,
}

impl RiskCategory {
    /// All categories, in report order.
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Weather,
        RiskCategory::MarketPrice,
        RiskCategory::PestDisease,
        RiskCategory::InputCosts,
        RiskCategory::Labor,
    ];

    /// Upper bound for this category's score.
    pub fn max_score(&self) -> f64 {
        match self {
            RiskCategory::Weather => 40.0,
            RiskCategory::MarketPrice => 20.0,
            RiskCategory::PestDisease => 25.0,
            RiskCategory::InputCosts => 25.0,
            RiskCategory::Labor => 12.0,
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::Weather => write!(f, "Weather"),
            RiskCategory::MarketPrice => write!(f, "Market Price"),
            RiskCategory::PestDisease => write!(f, "Pest/Disease"),
            RiskCategory::InputCosts => write!(f, "Input Costs"),
            RiskCategory::Labor => write!(f, "Labor"),
        }
    }
}

/// A scored risk category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskFactor {
    pub factor: RiskCategory,
    pub risk_pct: f64,
}

impl RiskFactor {
    /// True while the score sits inside this category's configured range.
    pub fn in_range(&self) -> bool {
        self.risk_pct >= 0.0 && self.risk_pct <= self.factor.max_score()
    }
}
