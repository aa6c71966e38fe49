//! Forecast report models

use serde::{Deserialize, Serialize};

use crate::models::{MarketQuote, RiskFactor, SoilSummary, WeatherSummary};
use crate::types::RiskLevel;

/// One period of the projected growth trajectory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthPoint {
    /// Period label: a month abbreviation for baseline forecasts
    /// ("Mar 2026"), or "Week N" for what-if curves
    pub period: String,
    pub yield_qtl: f64,
    pub income_inr: f64,
}

/// Headline numbers for a forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub expected_yield_qtl: f64,
    pub expected_income_inr: f64,
    pub harvest_date_label: String,
    pub risk_level: RiskLevel,
    pub overall_risk_pct: f64,
}

/// Full forecast report for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub summary: ForecastSummary,
    pub yield_forecast: Vec<GrowthPoint>,
    pub risk_factors: Vec<RiskFactor>,
    pub market: MarketQuote,
    pub weather: WeatherSummary,
    pub soil: SoilSummary,
}
