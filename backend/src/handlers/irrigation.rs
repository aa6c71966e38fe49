//! HTTP handlers for irrigation endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::IrrigationEstimate;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for the irrigation plan; anything omitted comes from the
/// active profile
#[derive(Debug, Deserialize)]
pub struct IrrigationQuery {
    pub crop: Option<String>,
    pub area_hectares: Option<f64>,
    pub pincode: Option<String>,
}

/// Weekly irrigation plan
pub async fn get_irrigation_plan(
    State(state): State<AppState>,
    Query(query): Query<IrrigationQuery>,
) -> AppResult<Json<IrrigationEstimate>> {
    let profile = state.profiles.active();

    let crop = query
        .crop
        .or_else(|| profile.as_ref().and_then(|p| p.crop.clone()))
        .filter(|c| !c.trim().is_empty())
        .ok_or(AppError::CropUnresolved)?;
    let area = query
        .area_hectares
        .or_else(|| profile.as_ref().map(|p| p.area_hectares))
        .filter(|a| *a > 0.0)
        .unwrap_or(1.0);
    let pincode = query
        .pincode
        .or_else(|| profile.as_ref().map(|p| p.pincode.clone()))
        .ok_or(AppError::NoActiveProfile)?;

    let plan = state.irrigation.plan(&crop, area, &pincode).await?;
    Ok(Json(plan))
}
