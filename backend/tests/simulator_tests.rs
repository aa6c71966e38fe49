//! Scenario engine integration tests
//!
//! Exercise the what-if pipeline offline: adapters pointed at dead endpoints
//! degrade the way production outages would (default weather, degraded soil,
//! base-table prices, embedded irrigation error) while the simulation itself
//! still completes.

use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use agritwin_backend::external::{GeocodeClient, MandiClient, PowerClient, SoilGridsClient};
use agritwin_backend::services::features::FeatureRow;
use agritwin_backend::services::predictor::{YieldModel, YieldPredictor};
use agritwin_backend::services::profile::CreateProfileInput;
use agritwin_backend::services::simulator::{delay_penalty, ScenarioInputs, ScenarioService};
use agritwin_backend::services::{
    IrrigationService, MarketService, ProfileStore, SoilService, WeatherService,
};
use shared::{IrrigationOutcome, SoilSummary, WeatherSummary, WhatIfRequest};

/// Model stub returning a fixed estimate
struct FixedModel(f64);

impl YieldModel for FixedModel {
    fn predict(&self, _row: &FeatureRow) -> f64 {
        self.0
    }
}

/// Endpoint nothing listens on, so every fetch fails fast
const DEAD_URL: &str = "http://127.0.0.1:9";

fn scenario_service(estimate: f64, with_profile: bool) -> ScenarioService {
    let geocode = GeocodeClient::new(DEAD_URL.to_string(), "AgriTwin-tests/1.0".to_string());
    let cache_dir = std::env::temp_dir().join(format!("agritwin-cache-{}", Uuid::new_v4()));

    let weather = Arc::new(WeatherService::new(
        PowerClient::new(DEAD_URL.to_string()),
        geocode.clone(),
        &cache_dir,
        30,
    ));
    let soil = Arc::new(SoilService::new(
        SoilGridsClient::new(DEAD_URL.to_string()),
        geocode.clone(),
        &cache_dir,
        20,
        2,
    ));
    let market = Arc::new(MarketService::new(
        MandiClient::new(DEAD_URL.to_string()),
        geocode,
    ));
    let irrigation = Arc::new(IrrigationService::new(Arc::clone(&weather)));

    let profiles_path = std::env::temp_dir().join(format!("agritwin-profiles-{}.json", Uuid::new_v4()));
    let profiles = Arc::new(ProfileStore::open(profiles_path).unwrap());
    if with_profile {
        profiles
            .create(CreateProfileInput {
                name: "Asha".to_string(),
                phone: "9812345678".to_string(),
                pincode: "110001".to_string(),
                state: Some("Punjab".to_string()),
                district: Some("Ludhiana".to_string()),
                crop: Some("rice".to_string()),
                season: Some("Kharif".to_string()),
                area_hectares: 1.5,
                sms_alerts: None,
            })
            .unwrap();
    }

    ScenarioService::new(
        YieldPredictor::new(Arc::new(FixedModel(estimate))),
        profiles,
        weather,
        soil,
        market,
        irrigation,
        10,
        2.0,
    )
}

fn inputs(crop: &str, area: f64, sowing: u32, irrigation: u32) -> ScenarioInputs {
    ScenarioInputs {
        crop: crop.to_string(),
        season: "Kharif".to_string(),
        state: Some("Punjab".to_string()),
        district: None,
        pincode: Some("110001".to_string()),
        area_hectares: area,
        sowing_delay_weeks: sowing,
        irrigation_delay_weeks: irrigation,
        crop_year: 2025,
        weather: WeatherSummary {
            rainfall_7d_total: 12.0,
            temp_7d_avg: 27.0,
            humidity_7d_avg: 70.0,
        },
        soil: SoilSummary::unavailable("test"),
        price_per_quintal: 2200.0,
        irrigation: IrrigationOutcome::failed("test outage"),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn penalty_worked_example() {
    // two weeks late sowing, one week late irrigation
    assert!((delay_penalty(2, 1) - 0.87).abs() < 1e-9);
}

#[test]
fn simulation_applies_the_delay_penalty() {
    let service = scenario_service(100.0, false);
    let result = service.simulate(inputs("rice", 1.0, 2, 1), &mut StdRng::seed_from_u64(5));

    assert_eq!(result.baseline_yield_qtl, 100.0);
    assert!((result.delay_penalty - 0.87).abs() < 1e-9);
    assert_eq!(result.predicted_yield_qtl, 87.0);
    assert_eq!(result.growth_curve.len(), 10);
    for point in &result.growth_curve {
        assert!(point.yield_qtl >= 0.0);
        assert!(point.income_inr >= 0.0);
    }

    // the failed irrigation estimate is embedded, not fatal
    assert!(result.irrigation.estimate.is_none());
    assert_eq!(result.irrigation.error.as_deref(), Some("test outage"));

    // effective inputs are echoed for auditability
    assert_eq!(result.inputs.crop, "rice");
    assert_eq!(result.inputs.sowing_delay_weeks, 2);
    assert_eq!(result.inputs.irrigation_delay_weeks, 1);
}

#[test]
fn degenerate_model_output_falls_back_before_the_penalty() {
    let service = scenario_service(-5.0, false);
    let result = service.simulate(inputs("wheat", 2.0, 0, 0), &mut StdRng::seed_from_u64(5));

    // wheat fallback 20 qtl/ha * 2 ha, no delay discount
    assert_eq!(result.baseline_yield_qtl, 40.0);
    assert_eq!(result.predicted_yield_qtl, 40.0);
    assert_eq!(result.delay_penalty, 1.0);
}

#[test]
fn evaluate_degrades_gracefully_when_every_adapter_is_down() {
    let service = scenario_service(100.0, true);
    let request = WhatIfRequest {
        crop: Some("wheat".to_string()),
        area_hectares: Some(2.0),
        rainfall_7d_total: Some(8.0),
        temp_7d_avg: Some(24.0),
        humidity_7d_avg: Some(65.0),
        soil_ph: Some(6.5),
        sowing_delay_weeks: 2,
        irrigation_delay_weeks: 1,
        ..WhatIfRequest::default()
    };

    let result = tokio_test::block_on(service.evaluate(&request)).unwrap();

    // request overrides win over the active profile
    assert_eq!(result.inputs.crop, "wheat");
    assert_eq!(result.inputs.area_hectares, 2.0);
    assert_eq!(result.weather.rainfall_7d_total, 8.0);
    assert_eq!(result.weather.temp_7d_avg, 24.0);
    assert_eq!(result.soil.ph, Some(6.5));
    assert!(!result.soil.degraded);

    // penalty applied to the stubbed baseline
    assert_eq!(result.baseline_yield_qtl, 100.0);
    assert_eq!(result.predicted_yield_qtl, 87.0);
    assert_eq!(result.growth_curve.len(), 10);

    // irrigation could not be estimated, but the run still succeeded
    assert!(result.irrigation.estimate.is_none());
    assert!(result.irrigation.error.is_some());
}

#[test]
fn unresolvable_crop_is_a_hard_error() {
    let service = scenario_service(100.0, false);
    let request = WhatIfRequest::default();

    let result = tokio_test::block_on(service.evaluate(&request));
    assert!(result.is_err());
}

#[test]
fn profile_supplies_whatever_the_request_leaves_out() {
    let service = scenario_service(60.0, true);
    let request = WhatIfRequest {
        rainfall_7d_total: Some(20.0),
        temp_7d_avg: Some(26.0),
        humidity_7d_avg: Some(60.0),
        ..WhatIfRequest::default()
    };

    let result = tokio_test::block_on(service.evaluate(&request)).unwrap();

    // crop, season and area come from the active profile
    assert_eq!(result.inputs.crop, "rice");
    assert_eq!(result.inputs.season, "Kharif");
    assert_eq!(result.inputs.area_hectares, 1.5);
    assert_eq!(result.inputs.pincode.as_deref(), Some("110001"));
    // no delays requested: no discount
    assert_eq!(result.delay_penalty, 1.0);
    assert_eq!(result.predicted_yield_qtl, 60.0);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: the delay penalty stays in [0.2, 1.0] for all delays
    #[test]
    fn penalty_stays_in_bounds(sowing in any::<u32>(), irrigation in any::<u32>()) {
        let p = delay_penalty(sowing, irrigation);
        prop_assert!((0.2..=1.0).contains(&p));
    }

    /// Property: without noise, the adjusted yield is exactly the baseline
    /// times the penalty
    #[test]
    fn adjusted_yield_tracks_the_penalty(
        baseline in 0.1f64..500.0,
        sowing in 0u32..60,
        irrigation in 0u32..60,
    ) {
        let service = scenario_service(baseline, false);
        let result = service.simulate(
            inputs("rice", 1.0, sowing, irrigation),
            &mut StdRng::seed_from_u64(1),
        );

        let expected = baseline * delay_penalty(sowing, irrigation);
        prop_assert!((result.predicted_yield_qtl - round2(expected)).abs() < 1e-9);
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
