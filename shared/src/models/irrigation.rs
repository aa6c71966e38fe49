//! Irrigation planning models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the irrigation schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationDay {
    pub date: NaiveDate,
    /// Weekday abbreviation ("Mon", "Tue", ...)
    pub day_name: String,
    pub rainfall_mm: f64,
    /// Net irrigation to apply that day after rain credit
    pub irrigation_mm: f64,
}

/// Weekly irrigation requirement for a crop at a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationEstimate {
    /// Net water deficit for the week (mm)
    pub water_needed_mm: f64,
    /// Deficit converted to volume for the whole plot (liters)
    pub water_needed_liters: f64,
    pub rationale: String,
    pub schedule: Vec<IrrigationDay>,
}

/// Irrigation section of a what-if response
///
/// An upstream failure degrades to an explanatory error payload here instead
/// of failing the whole simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<IrrigationEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IrrigationOutcome {
    pub fn ok(estimate: IrrigationEstimate) -> Self {
        Self {
            estimate: Some(estimate),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            estimate: None,
            error: Some(error.into()),
        }
    }
}
