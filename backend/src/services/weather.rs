//! Weather adapter
//!
//! Resolves a pincode to coordinates, pulls the last month of daily
//! observations, and exposes the 7-day aggregates the forecasting core
//! consumes. Responses are cached on disk per pincode and fetch date; a
//! missing or unreadable cache entry is a miss and triggers a refetch,
//! never an error.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate, Utc};
use shared::{DailyWeather, WeatherSummary};

use crate::error::AppResult;
use crate::external::{GeocodeClient, PowerClient};

/// Weather adapter service
#[derive(Clone)]
pub struct WeatherService {
    power: PowerClient,
    geocode: GeocodeClient,
    cache_dir: PathBuf,
    history_days: u32,
}

impl WeatherService {
    pub fn new(
        power: PowerClient,
        geocode: GeocodeClient,
        cache_dir: impl Into<PathBuf>,
        history_days: u32,
    ) -> Self {
        Self {
            power,
            geocode,
            cache_dir: cache_dir.into(),
            history_days: history_days.max(7),
        }
    }

    /// 7-day aggregates for a pincode.
    pub async fn summary(&self, pincode: &str) -> AppResult<WeatherSummary> {
        let history = self.history(pincode).await?;
        Ok(summarize_last_week(&history))
    }

    /// Last 7 daily records for a pincode, oldest first.
    pub async fn weekly(&self, pincode: &str) -> AppResult<Vec<DailyWeather>> {
        let history = self.history(pincode).await?;
        let start = history.len().saturating_sub(7);
        Ok(history[start..].to_vec())
    }

    async fn history(&self, pincode: &str) -> AppResult<Vec<DailyWeather>> {
        let today = Utc::now().date_naive();
        let cache_path = self
            .cache_dir
            .join(format!("weather_{}_{}.json", pincode, today.format("%Y%m%d")));

        // Stale or unreadable cache entries are treated as misses
        if let Ok(raw) = std::fs::read_to_string(&cache_path) {
            match serde_json::from_str::<Vec<DailyWeather>>(&raw) {
                Ok(history) if !history.is_empty() => {
                    tracing::debug!(pincode, "weather cache hit");
                    return Ok(history);
                }
                _ => tracing::debug!(pincode, "weather cache unreadable, refetching"),
            }
        }

        let coords = self.geocode.coordinates(pincode).await?;
        let end = today - Duration::days(1);
        let start = end - Duration::days(self.history_days as i64 - 1);
        let history = self.power.daily_history(coords, start, end).await?;
        tracing::info!(pincode, days = history.len(), "weather history fetched");

        if let Err(e) = self.write_cache(&cache_path, &history) {
            tracing::warn!(pincode, error = %e, "could not cache weather history");
        }

        Ok(history)
    }

    fn write_cache(&self, path: &std::path::Path, history: &[DailyWeather]) -> AppResult<()> {
        std::fs::create_dir_all(&self.cache_dir)?;
        std::fs::write(path, serde_json::to_string(history)?)?;
        Ok(())
    }
}

/// Aggregate the trailing 7 days of a daily series.
pub fn summarize_last_week(history: &[DailyWeather]) -> WeatherSummary {
    let start = history.len().saturating_sub(7);
    let week = &history[start..];
    if week.is_empty() {
        return WeatherSummary::default();
    }

    let n = week.len() as f64;
    let rainfall: f64 = week.iter().map(|d| d.rainfall_mm).sum();
    let temp: f64 = week.iter().map(|d| d.temperature_c).sum::<f64>() / n;
    let humidity: f64 = week.iter().map(|d| d.humidity_pct).sum::<f64>() / n;

    WeatherSummary {
        rainfall_7d_total: round1(rainfall),
        temp_7d_avg: round1(temp),
        humidity_7d_avg: round1(humidity),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: NaiveDate, rain: f64, temp: f64, humidity: f64) -> DailyWeather {
        DailyWeather {
            date,
            temperature_c: temp,
            humidity_pct: humidity,
            rainfall_mm: rain,
            sunlight_hours: 8.0,
        }
    }

    #[test]
    fn summary_uses_only_the_trailing_week() {
        let base = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let mut history: Vec<DailyWeather> = (0..30)
            .map(|i| day(base + Duration::days(i), 0.0, 20.0, 50.0))
            .collect();
        // spike outside the window, then a wet final week
        history[10].rainfall_mm = 100.0;
        for d in history.iter_mut().rev().take(7) {
            d.rainfall_mm = 2.0;
            d.temperature_c = 30.0;
        }

        let summary = summarize_last_week(&history);
        assert_eq!(summary.rainfall_7d_total, 14.0);
        assert_eq!(summary.temp_7d_avg, 30.0);
        assert_eq!(summary.humidity_7d_avg, 50.0);
    }

    #[test]
    fn short_history_is_averaged_over_what_exists() {
        let base = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let history = vec![day(base, 3.0, 24.0, 60.0), day(base, 5.0, 26.0, 70.0)];
        let summary = summarize_last_week(&history);
        assert_eq!(summary.rainfall_7d_total, 8.0);
        assert_eq!(summary.temp_7d_avg, 25.0);
        assert_eq!(summary.humidity_7d_avg, 65.0);
    }

    #[test]
    fn empty_history_degrades_to_zeros() {
        assert_eq!(summarize_last_week(&[]), WeatherSummary::default());
    }
}
