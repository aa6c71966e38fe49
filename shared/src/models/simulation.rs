//! What-if scenario models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{GrowthPoint, IrrigationOutcome, SoilSummary, WeatherSummary};

/// User-supplied overrides for a scenario run
///
/// Every field is optional; anything left out is taken from the active
/// profile or fetched fresh. Delays are whole weeks.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct WhatIfRequest {
    pub crop: Option<String>,
    pub pincode: Option<String>,
    #[validate(range(min = 0.01, message = "area must be positive"))]
    pub area_hectares: Option<f64>,
    pub season: Option<String>,

    // Weather overrides
    pub rainfall_7d_total: Option<f64>,
    pub temp_7d_avg: Option<f64>,
    pub humidity_7d_avg: Option<f64>,

    // Soil overrides
    pub soil_ph: Option<f64>,
    pub organic_carbon_pct: Option<f64>,
    pub sand_pct: Option<f64>,
    pub silt_pct: Option<f64>,
    pub clay_pct: Option<f64>,

    // Simulated operational delays
    #[serde(default)]
    #[validate(range(max = 52, message = "sowing delay capped at one year"))]
    pub sowing_delay_weeks: u32,
    #[serde(default)]
    #[validate(range(max = 52, message = "irrigation delay capped at one year"))]
    pub irrigation_delay_weeks: u32,
}

/// The inputs a scenario actually ran with, after overlaying overrides on the
/// active profile. Echoed back for auditability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveInputs {
    pub crop: String,
    pub pincode: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub season: String,
    pub area_hectares: f64,
    pub sowing_delay_weeks: u32,
    pub irrigation_delay_weeks: u32,
}

/// Scenario simulation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfResult {
    /// Yield after the delay penalty, quintals for the declared area
    pub predicted_yield_qtl: f64,
    /// Model (or fallback) yield before the penalty
    pub baseline_yield_qtl: f64,
    /// Multiplicative discount applied for delays, in [0.2, 1.0]
    pub delay_penalty: f64,
    /// Week-indexed growth trajectory for the adjusted yield
    pub growth_curve: Vec<GrowthPoint>,
    pub weather: WeatherSummary,
    pub soil: SoilSummary,
    pub irrigation: IrrigationOutcome,
    pub inputs: EffectiveInputs,
}
