//! Irrigation planning
//!
//! Weekly water deficit for a crop at a location: requirement minus rain
//! credit, converted to volume for the plot, plus a per-day schedule derived
//! from the observed week.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use shared::{DailyWeather, IrrigationDay, IrrigationEstimate, WeatherSummary};

use crate::error::AppResult;
use crate::services::crops;
use crate::services::weather::WeatherService;

/// Liters of water per mm of depth over one hectare
const LITERS_PER_MM_HA: f64 = 10_000.0;

/// Irrigation planner
#[derive(Clone)]
pub struct IrrigationService {
    weather: Arc<WeatherService>,
}

impl IrrigationService {
    pub fn new(weather: Arc<WeatherService>) -> Self {
        Self { weather }
    }

    /// Compute the weekly irrigation plan for a crop at a pincode.
    pub async fn plan(
        &self,
        crop: &str,
        area_hectares: f64,
        pincode: &str,
    ) -> AppResult<IrrigationEstimate> {
        let summary = self.weather.summary(pincode).await?;
        let weekly = self.weather.weekly(pincode).await?;
        let today = Utc::now().date_naive();
        Ok(estimate(crop, area_hectares, &summary, &weekly, today))
    }
}

/// Pure deficit computation, separated from the fetch for testability.
pub fn estimate(
    crop: &str,
    area_hectares: f64,
    summary: &WeatherSummary,
    weekly: &[DailyWeather],
    today: NaiveDate,
) -> IrrigationEstimate {
    let base_need = crops::water_requirement_mm_week(crop);
    let rainfall_total = summary.rainfall_7d_total;

    let water_deficit = (base_need - rainfall_total).max(0.0);
    let liters = water_deficit * area_hectares * LITERS_PER_MM_HA;

    let daily_need = base_need / 7.0;
    let schedule = weekly
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let date = today + Duration::days(i as i64);
            IrrigationDay {
                date: day.date,
                day_name: date.format("%a").to_string(),
                rainfall_mm: day.rainfall_mm,
                irrigation_mm: round2((daily_need - day.rainfall_mm).max(0.0)),
            }
        })
        .collect();

    IrrigationEstimate {
        water_needed_mm: round2(water_deficit),
        water_needed_liters: round2(liters),
        rationale: format!(
            "{} requires ~{} mm/week. Rainfall over the last 7 days ({:.1} mm) reduces the net irrigation need.",
            crop, base_need, rainfall_total
        ),
        schedule,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(rain: f64) -> WeatherSummary {
        WeatherSummary {
            rainfall_7d_total: rain,
            temp_7d_avg: 26.0,
            humidity_7d_avg: 60.0,
        }
    }

    fn week(rain_per_day: f64) -> Vec<DailyWeather> {
        let base = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        (0..7)
            .map(|i| DailyWeather {
                date: base + Duration::days(i),
                temperature_c: 26.0,
                humidity_pct: 60.0,
                rainfall_mm: rain_per_day,
                sunlight_hours: 8.0,
            })
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 8).unwrap()
    }

    #[test]
    fn deficit_scales_to_plot_volume() {
        // rice needs 50mm, got 10mm: 40mm deficit over 2ha
        let plan = estimate("rice", 2.0, &summary(10.0), &week(0.0), today());
        assert_eq!(plan.water_needed_mm, 40.0);
        assert_eq!(plan.water_needed_liters, 800_000.0);
    }

    #[test]
    fn surplus_rain_means_no_irrigation() {
        let plan = estimate("millets", 1.0, &summary(35.0), &week(5.0), today());
        assert_eq!(plan.water_needed_mm, 0.0);
        assert_eq!(plan.water_needed_liters, 0.0);
        // daily need 20/7 < 5mm rain each day
        assert!(plan.schedule.iter().all(|d| d.irrigation_mm == 0.0));
    }

    #[test]
    fn schedule_covers_the_observed_week() {
        let plan = estimate("wheat", 1.0, &summary(0.0), &week(0.0), today());
        assert_eq!(plan.schedule.len(), 7);
        // wheat daily need 30/7
        for day in &plan.schedule {
            assert!((day.irrigation_mm - 4.29).abs() < 0.01);
        }
        assert_eq!(plan.schedule[0].day_name, "Tue"); // 2025-07-08
    }

    #[test]
    fn unknown_crop_uses_default_requirement() {
        let plan = estimate("dragonfruit", 1.0, &summary(0.0), &week(0.0), today());
        assert_eq!(plan.water_needed_mm, 30.0);
    }
}
