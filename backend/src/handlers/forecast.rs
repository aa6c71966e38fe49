//! HTTP handlers for forecast endpoints

use axum::{extract::State, Json};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::ForecastResult;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Generate the farm report for the active profile
pub async fn get_farm_report(State(state): State<AppState>) -> AppResult<Json<ForecastResult>> {
    let profile = state.profiles.active().ok_or(AppError::NoActiveProfile)?;
    let crop = profile
        .crop
        .clone()
        .filter(|c| !c.trim().is_empty())
        .ok_or(AppError::CropUnresolved)?;

    let weather = state.weather.summary(&profile.pincode).await?;
    let soil = state.soil.summary(&profile.pincode).await?;
    let market = state
        .market
        .quote_for_pincode(
            &crop,
            &profile.pincode,
            profile.state.as_deref(),
            profile.district.as_deref(),
        )
        .await;

    let mut rng = StdRng::from_entropy();
    let report = state.forecast.generate(
        &profile,
        &weather,
        &soil,
        market,
        Utc::now().date_naive(),
        &mut rng,
    )?;

    Ok(Json(report))
}
