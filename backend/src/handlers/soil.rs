//! HTTP handlers for soil endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use shared::SoilSummary;

use crate::error::{AppError, AppResult};
use crate::handlers::weather::LocationQuery;
use crate::AppState;

/// Topsoil summary for a location
pub async fn get_soil_summary(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<SoilSummary>> {
    let pincode = query
        .pincode
        .or_else(|| state.profiles.active().map(|p| p.pincode))
        .ok_or(AppError::NoActiveProfile)?;
    let summary = state.soil.summary(&pincode).await?;
    Ok(Json(summary))
}
