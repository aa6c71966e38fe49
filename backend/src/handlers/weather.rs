//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{DailyWeather, WeatherSummary};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Location query; falls back to the active profile's pincode
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub pincode: Option<String>,
}

fn resolve_pincode(state: &AppState, query: LocationQuery) -> AppResult<String> {
    query
        .pincode
        .or_else(|| state.profiles.active().map(|p| p.pincode))
        .ok_or(AppError::NoActiveProfile)
}

/// 7-day weather aggregates
pub async fn get_weather_summary(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<WeatherSummary>> {
    let pincode = resolve_pincode(&state, query)?;
    let summary = state.weather.summary(&pincode).await?;
    Ok(Json(summary))
}

/// Last week of daily observations
pub async fn get_weather_weekly(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<Vec<DailyWeather>>> {
    let pincode = resolve_pincode(&state, query)?;
    let weekly = state.weather.weekly(&pincode).await?;
    Ok(Json(weekly))
}
