//! Forecast report generation
//!
//! Turns the active profile plus fresh weather/soil/market data into the
//! dashboard report: expected yield and income, harvest window, risk
//! breakdown and a month-by-month growth trajectory.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use shared::{
    FarmerProfile, ForecastResult, ForecastSummary, MarketQuote, SoilSummary, WeatherSummary,
};

use crate::config::RiskConfig;
use crate::error::{AppError, AppResult};
use crate::services::features::{assemble, FieldContext};
use crate::services::predictor::YieldPredictor;
use crate::services::{crops, growth, risk};

/// Forecast generator
#[derive(Clone)]
pub struct ForecastService {
    predictor: YieldPredictor,
    risk_cfg: RiskConfig,
    monthly_noise_pct: f64,
}

impl ForecastService {
    pub fn new(predictor: YieldPredictor, risk_cfg: RiskConfig, monthly_noise_pct: f64) -> Self {
        Self {
            predictor,
            risk_cfg,
            monthly_noise_pct,
        }
    }

    /// Generate the full report for a profile. `sowing_date` anchors the
    /// harvest label and the growth timeline.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        profile: &FarmerProfile,
        weather: &WeatherSummary,
        soil: &SoilSummary,
        market: MarketQuote,
        sowing_date: NaiveDate,
        rng: &mut R,
    ) -> AppResult<ForecastResult> {
        let crop = profile
            .crop
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or(AppError::CropUnresolved)?;

        let area = if profile.area_hectares > 0.0 {
            profile.area_hectares
        } else {
            1.0
        };

        let meta = crops::crop_meta(crop, None);
        let season = profile
            .season
            .clone()
            .unwrap_or_else(|| meta.default_season.to_string());
        let price = if market.avg_price > 0.0 {
            market.avg_price
        } else {
            meta.default_price
        };

        tracing::debug!(
            crop,
            area,
            season = %season,
            price,
            duration_days = meta.duration_days,
            "generating forecast"
        );

        let context = FieldContext {
            state: profile.state.clone(),
            district: profile.district.clone(),
            crop: Some(crop.to_string()),
            season: Some(season),
            crop_year: sowing_date.year(),
            area_hectares: area,
            production_so_far: 0.0,
        };
        let row = assemble(&context, weather, soil);
        let raw_estimate = self.predictor.predict(&row);
        let expected_yield = apply_yield_fallback(raw_estimate, crop, area);

        let expected_income = expected_yield * price;

        let harvest_date = sowing_date + Duration::days(meta.duration_days as i64);
        let harvest_date_label = harvest_date.format("%b %Y").to_string();

        let risk_factors = risk::score(crop, weather, soil, &self.risk_cfg);
        let (overall_risk, risk_level) = risk::overall(&risk_factors);

        let months = (meta.duration_days / 30).max(1);
        let yield_forecast = growth::monthly_curve(
            expected_yield,
            months,
            price,
            sowing_date,
            self.monthly_noise_pct,
            rng,
        );

        tracing::debug!(
            expected_yield,
            expected_income,
            overall_risk,
            %risk_level,
            "forecast complete"
        );

        Ok(ForecastResult {
            summary: ForecastSummary {
                expected_yield_qtl: round2(expected_yield),
                expected_income_inr: round2(expected_income),
                harvest_date_label,
                risk_level,
                overall_risk_pct: round2(overall_risk),
            },
            yield_forecast,
            risk_factors,
            market,
            weather: *weather,
            soil: soil.clone(),
        })
    }
}

/// Clamp a model estimate, substituting the per-crop safety-net yield
/// (scaled by area) when the model output is non-positive. The fallback is a
/// guard against degenerate model outputs, not a modeling technique.
pub fn apply_yield_fallback(raw_estimate: f64, crop: &str, area_hectares: f64) -> f64 {
    if raw_estimate.is_finite() && raw_estimate > 0.0 {
        return raw_estimate;
    }
    let fallback = crops::fallback_yield_qtl_per_ha(crop) * area_hectares;
    tracing::warn!(
        crop,
        raw_estimate,
        fallback,
        "model returned a non-positive yield, using fallback table"
    );
    fallback.max(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
