//! What-if scenario engine
//!
//! Replays a forecast under user-supplied overrides and simulated sowing/
//! irrigation delays. Overrides win over the active profile; data nobody
//! supplied is fetched fresh. The only hard error is an unresolvable crop;
//! everything else degrades (weather/soil to defaults, irrigation to an
//! embedded error payload).

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{
    EffectiveInputs, IrrigationOutcome, PhStatus, SoilSummary, SoilTexture, WeatherSummary,
    WhatIfRequest, WhatIfResult,
};

use crate::error::{AppError, AppResult};
use crate::services::features::{assemble, FieldContext};
use crate::services::forecast::apply_yield_fallback;
use crate::services::irrigation::IrrigationService;
use crate::services::market::MarketService;
use crate::services::predictor::YieldPredictor;
use crate::services::profile::ProfileStore;
use crate::services::soil::SoilService;
use crate::services::weather::WeatherService;
use crate::services::{crops, growth};

// Penalty slope per week of delay
const SOWING_PENALTY_PER_WEEK: f64 = 0.05;
const IRRIGATION_PENALTY_PER_WEEK: f64 = 0.03;
// Floor guarding against unrealistic zero/negative yields from large delays
const PENALTY_FLOOR: f64 = 0.2;

/// Scenario engine
#[derive(Clone)]
pub struct ScenarioService {
    predictor: YieldPredictor,
    profiles: Arc<ProfileStore>,
    weather: Arc<WeatherService>,
    soil: Arc<SoilService>,
    market: Arc<MarketService>,
    irrigation: Arc<IrrigationService>,
    weeks: u32,
    weekly_noise_abs: f64,
}

/// Everything a simulation needs, resolved and fetched up front so the
/// compute step stays synchronous and replayable.
#[derive(Debug, Clone)]
pub struct ScenarioInputs {
    pub crop: String,
    pub season: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub pincode: Option<String>,
    pub area_hectares: f64,
    pub sowing_delay_weeks: u32,
    pub irrigation_delay_weeks: u32,
    pub crop_year: i32,
    pub weather: WeatherSummary,
    pub soil: SoilSummary,
    pub price_per_quintal: f64,
    pub irrigation: IrrigationOutcome,
}

impl ScenarioService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        predictor: YieldPredictor,
        profiles: Arc<ProfileStore>,
        weather: Arc<WeatherService>,
        soil: Arc<SoilService>,
        market: Arc<MarketService>,
        irrigation: Arc<IrrigationService>,
        weeks: u32,
        weekly_noise_abs: f64,
    ) -> Self {
        Self {
            predictor,
            profiles,
            weather,
            soil,
            market,
            irrigation,
            weeks,
            weekly_noise_abs,
        }
    }

    /// Run a scenario end to end with a fresh random source.
    pub async fn evaluate(&self, request: &WhatIfRequest) -> AppResult<WhatIfResult> {
        let inputs = self.resolve(request).await?;
        let mut rng = StdRng::from_entropy();
        Ok(self.simulate(inputs, &mut rng))
    }

    /// Overlay the request on the active profile and fetch whatever the
    /// overrides did not supply.
    pub async fn resolve(&self, request: &WhatIfRequest) -> AppResult<ScenarioInputs> {
        let active = self.profiles.active();

        let crop = request
            .crop
            .clone()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| active.as_ref().and_then(|p| p.crop.clone()))
            .filter(|c| !c.trim().is_empty())
            .ok_or(AppError::CropUnresolved)?;

        let pincode = request
            .pincode
            .clone()
            .or_else(|| active.as_ref().map(|p| p.pincode.clone()))
            .filter(|p| !p.trim().is_empty());

        let area_hectares = request
            .area_hectares
            .or_else(|| active.as_ref().map(|p| p.area_hectares))
            .filter(|a| *a > 0.0)
            .unwrap_or(1.0);

        let season = request
            .season
            .clone()
            .or_else(|| active.as_ref().and_then(|p| p.season.clone()))
            .unwrap_or_else(|| crops::crop_meta(&crop, None).default_season.to_string());

        let state = active.as_ref().and_then(|p| p.state.clone());
        let district = active.as_ref().and_then(|p| p.district.clone());

        let weather = self.resolve_weather(request, pincode.as_deref()).await;
        let soil = self.resolve_soil(request, pincode.as_deref()).await;

        let quote = match pincode.as_deref() {
            Some(pin) => {
                self.market
                    .quote_for_pincode(&crop, pin, state.as_deref(), district.as_deref())
                    .await
            }
            None => {
                self.market
                    .quote(&crop, state.as_deref(), district.as_deref())
                    .await
            }
        };
        let price_per_quintal = if quote.avg_price > 0.0 {
            quote.avg_price
        } else {
            crops::base_price_per_quintal(&crop)
        };

        let irrigation = match pincode.as_deref() {
            Some(pin) => match self.irrigation.plan(&crop, area_hectares, pin).await {
                Ok(estimate) => IrrigationOutcome::ok(estimate),
                Err(e) => {
                    tracing::warn!(error = %e, "irrigation estimate failed, embedding error");
                    IrrigationOutcome::failed(e.to_string())
                }
            },
            None => IrrigationOutcome::failed(
                "No pincode available to estimate irrigation".to_string(),
            ),
        };

        Ok(ScenarioInputs {
            crop,
            season,
            state,
            district,
            pincode,
            area_hectares,
            sowing_delay_weeks: request.sowing_delay_weeks,
            irrigation_delay_weeks: request.irrigation_delay_weeks,
            crop_year: Utc::now().year(),
            weather,
            soil,
            price_per_quintal,
            irrigation,
        })
    }

    /// The synchronous core: predict, discount for delays, expand into the
    /// weekly curve. Deterministic for a given `rng`.
    pub fn simulate<R: Rng + ?Sized>(&self, inputs: ScenarioInputs, rng: &mut R) -> WhatIfResult {
        let context = FieldContext {
            state: inputs.state.clone(),
            district: inputs.district.clone(),
            crop: Some(inputs.crop.clone()),
            season: Some(inputs.season.clone()),
            crop_year: inputs.crop_year,
            area_hectares: inputs.area_hectares,
            production_so_far: 0.0,
        };
        let row = assemble(&context, &inputs.weather, &inputs.soil);
        let raw_estimate = self.predictor.predict(&row);
        let baseline = apply_yield_fallback(raw_estimate, &inputs.crop, inputs.area_hectares);

        let penalty = delay_penalty(inputs.sowing_delay_weeks, inputs.irrigation_delay_weeks);
        let adjusted = baseline * penalty;

        tracing::debug!(
            crop = %inputs.crop,
            baseline,
            penalty,
            adjusted,
            "scenario simulated"
        );

        let growth_curve = growth::weekly_curve(
            adjusted,
            self.weeks,
            inputs.price_per_quintal,
            self.weekly_noise_abs,
            rng,
        );

        WhatIfResult {
            predicted_yield_qtl: round2(adjusted),
            baseline_yield_qtl: round2(baseline),
            delay_penalty: penalty,
            growth_curve,
            weather: inputs.weather,
            soil: inputs.soil.clone(),
            irrigation: inputs.irrigation.clone(),
            inputs: EffectiveInputs {
                crop: inputs.crop,
                pincode: inputs.pincode,
                state: inputs.state,
                district: inputs.district,
                season: inputs.season,
                area_hectares: inputs.area_hectares,
                sowing_delay_weeks: inputs.sowing_delay_weeks,
                irrigation_delay_weeks: inputs.irrigation_delay_weeks,
            },
        }
    }

    async fn resolve_weather(
        &self,
        request: &WhatIfRequest,
        pincode: Option<&str>,
    ) -> WeatherSummary {
        let overridden = request.rainfall_7d_total.is_some()
            && request.temp_7d_avg.is_some()
            && request.humidity_7d_avg.is_some();

        let mut base = if overridden {
            WeatherSummary::default()
        } else {
            match pincode {
                Some(pin) => self.weather.summary(pin).await.unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "weather fetch failed, using defaults");
                    WeatherSummary::default()
                }),
                None => WeatherSummary::default(),
            }
        };

        if let Some(rain) = request.rainfall_7d_total {
            base.rainfall_7d_total = rain;
        }
        if let Some(temp) = request.temp_7d_avg {
            base.temp_7d_avg = temp;
        }
        if let Some(humidity) = request.humidity_7d_avg {
            base.humidity_7d_avg = humidity;
        }
        base
    }

    async fn resolve_soil(&self, request: &WhatIfRequest, pincode: Option<&str>) -> SoilSummary {
        let mut base = match pincode {
            Some(pin) => self
                .soil
                .summary(pin)
                .await
                .unwrap_or_else(|e| SoilSummary::unavailable(e.to_string())),
            None => SoilSummary::unavailable("No location available for soil lookup"),
        };

        let has_override = request.soil_ph.is_some()
            || request.organic_carbon_pct.is_some()
            || request.sand_pct.is_some()
            || request.silt_pct.is_some()
            || request.clay_pct.is_some();
        if !has_override {
            return base;
        }

        if let Some(ph) = request.soil_ph {
            base.ph = Some(ph);
            base.degraded = false;
        }
        if let Some(soc) = request.organic_carbon_pct {
            base.organic_carbon_pct = Some(soc);
        }
        if let Some(sand) = request.sand_pct {
            base.sand_pct = Some(sand);
        }
        if let Some(silt) = request.silt_pct {
            base.silt_pct = Some(silt);
        }
        if let Some(clay) = request.clay_pct {
            base.clay_pct = Some(clay);
        }

        base.ph_status = base.ph.map(PhStatus::classify).unwrap_or(PhStatus::Unknown);
        base.texture = SoilTexture::classify(base.sand_pct, base.clay_pct);
        base.note = format!("{}; user overrides applied", base.note);
        base
    }
}

/// Multiplicative yield discount for delayed sowing/irrigation, clamped to
/// [0.2, 1.0].
pub fn delay_penalty(sowing_delay_weeks: u32, irrigation_delay_weeks: u32) -> f64 {
    let penalty = 1.0
        - SOWING_PENALTY_PER_WEEK * sowing_delay_weeks as f64
        - IRRIGATION_PENALTY_PER_WEEK * irrigation_delay_weeks as f64;
    penalty.clamp(PENALTY_FLOOR, 1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_matches_the_slope() {
        assert_eq!(delay_penalty(0, 0), 1.0);
        // 1 - 0.10 - 0.03
        assert!((delay_penalty(2, 1) - 0.87).abs() < 1e-9);
        assert!((delay_penalty(1, 0) - 0.95).abs() < 1e-9);
    }

    #[test]
    fn penalty_never_leaves_its_bounds() {
        assert_eq!(delay_penalty(52, 52), 0.2);
        assert_eq!(delay_penalty(1000, 1000), 0.2);
        for s in 0..20 {
            for i in 0..20 {
                let p = delay_penalty(s, i);
                assert!((0.2..=1.0).contains(&p));
            }
        }
    }
}
