//! HTTP handlers for market price endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::MarketQuote;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Price query; crop and location fall back to the active profile
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub crop: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
}

/// Average mandi price for a crop
pub async fn get_market_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> AppResult<Json<MarketQuote>> {
    let profile = state.profiles.active();

    let crop = query
        .crop
        .or_else(|| profile.as_ref().and_then(|p| p.crop.clone()))
        .filter(|c| !c.trim().is_empty())
        .ok_or(AppError::CropUnresolved)?;
    let region_state = query
        .state
        .or_else(|| profile.as_ref().and_then(|p| p.state.clone()));
    let district = query
        .district
        .or_else(|| profile.as_ref().and_then(|p| p.district.clone()));

    let quote = match profile.as_ref().map(|p| p.pincode.clone()) {
        Some(pincode) if region_state.is_none() && district.is_none() => {
            state
                .market
                .quote_for_pincode(&crop, &pincode, None, None)
                .await
        }
        _ => {
            state
                .market
                .quote(&crop, region_state.as_deref(), district.as_deref())
                .await
        }
    };

    Ok(Json(quote))
}
