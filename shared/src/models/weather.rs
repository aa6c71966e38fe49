//! Weather models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 7-day weather aggregates for a location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    /// Total rainfall over the last 7 days (mm)
    pub rainfall_7d_total: f64,
    /// Average temperature over the last 7 days (degrees C)
    pub temp_7d_avg: f64,
    /// Average relative humidity over the last 7 days (%)
    pub humidity_7d_avg: f64,
}

impl Default for WeatherSummary {
    fn default() -> Self {
        Self {
            rainfall_7d_total: 0.0,
            temp_7d_avg: 0.0,
            humidity_7d_avg: 0.0,
        }
    }
}

/// One day of observed weather
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub sunlight_hours: f64,
}
