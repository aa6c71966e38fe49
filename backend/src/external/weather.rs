//! Weather API client for fetching daily observations
//!
//! Integrates with the NASA POWER temporal daily-point API for rainfall,
//! temperature, humidity and solar radiation history.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shared::{DailyWeather, GpsCoordinates};

use crate::error::{AppError, AppResult};

/// Sentinel the POWER API uses for missing observations
const MISSING: f64 = -999.0;

/// NASA POWER daily-point client
#[derive(Clone)]
pub struct PowerClient {
    client: Client,
    base_url: String,
}

/// POWER API response envelope
#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameters,
}

/// Daily series keyed by YYYYMMDD date strings; a BTreeMap keeps them ordered
#[derive(Debug, Deserialize, Default)]
struct PowerParameters {
    #[serde(rename = "T2M", default)]
    temperature: BTreeMap<String, f64>,
    #[serde(rename = "RH2M", default)]
    humidity: BTreeMap<String, f64>,
    #[serde(rename = "PRECTOTCORR", default)]
    rainfall: BTreeMap<String, f64>,
    #[serde(rename = "ALLSKY_SFC_SW_DWN", default)]
    solar: BTreeMap<String, f64>,
}

impl PowerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch daily weather for a coordinate over an inclusive date range.
    pub async fn daily_history(
        &self,
        coords: GpsCoordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailyWeather>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("parameters", "T2M,RH2M,PRECTOTCORR,ALLSKY_SFC_SW_DWN"),
                ("start", &start.format("%Y%m%d").to_string()),
                ("end", &end.format("%Y%m%d").to_string()),
                ("latitude", &coords.latitude.to_string()),
                ("longitude", &coords.longitude.to_string()),
                ("format", "JSON"),
                ("community", "AG"),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherServiceUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::WeatherServiceUnavailable(format!(
                "weather API returned {}",
                response.status()
            )));
        }

        let data: PowerResponse = response.json().await.map_err(|e| {
            AppError::WeatherServiceUnavailable(format!("unexpected response: {}", e))
        })?;

        Ok(convert_daily_series(data.properties.parameter))
    }
}

/// Convert the per-parameter maps into one record per day.
fn convert_daily_series(params: PowerParameters) -> Vec<DailyWeather> {
    let mut records = Vec::with_capacity(params.temperature.len());

    for (day, temp) in &params.temperature {
        let Ok(date) = NaiveDate::parse_from_str(day, "%Y%m%d") else {
            continue;
        };

        let temperature_c = clean(*temp);
        let humidity_pct = clean(params.humidity.get(day).copied().unwrap_or(0.0));
        let rainfall_mm = clean(params.rainfall.get(day).copied().unwrap_or(0.0));
        let solar = clean(params.solar.get(day).copied().unwrap_or(0.0));

        // Approx sunlight hours from all-sky insolation (MJ/m^2/day)
        let sunlight_hours = (solar / 0.5 * 10.0).round() / 10.0;

        records.push(DailyWeather {
            date,
            temperature_c,
            humidity_pct,
            rainfall_mm,
            sunlight_hours,
        });
    }

    records
}

fn clean(value: f64) -> f64 {
    if value == MISSING {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn converts_and_orders_days() {
        let params = PowerParameters {
            temperature: series(&[("20250102", 27.0), ("20250101", 25.0)]),
            humidity: series(&[("20250101", 70.0), ("20250102", 75.0)]),
            rainfall: series(&[("20250101", 4.0), ("20250102", 0.0)]),
            solar: series(&[("20250101", 18.0), ("20250102", 20.0)]),
        };

        let days = convert_daily_series(params);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(days[0].temperature_c, 25.0);
        assert_eq!(days[0].sunlight_hours, 36.0);
        assert_eq!(days[1].humidity_pct, 75.0);
    }

    #[test]
    fn missing_sentinel_becomes_zero() {
        let params = PowerParameters {
            temperature: series(&[("20250101", -999.0)]),
            humidity: series(&[("20250101", -999.0)]),
            rainfall: series(&[("20250101", 6.5)]),
            solar: BTreeMap::new(),
        };

        let days = convert_daily_series(params);
        assert_eq!(days[0].temperature_c, 0.0);
        assert_eq!(days[0].humidity_pct, 0.0);
        assert_eq!(days[0].rainfall_mm, 6.5);
        assert_eq!(days[0].sunlight_hours, 0.0);
    }
}
