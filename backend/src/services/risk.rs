//! Deterministic risk scoring
//!
//! Five fixed categories scored from the same weather/soil signals the
//! predictor sees. Scores are independent; the overall level comes from
//! their mean.

use shared::{RiskCategory, RiskFactor, RiskLevel, SoilSummary, WeatherSummary};

use crate::config::RiskConfig;
use crate::services::crops;

/// Score every risk category for a crop under current conditions.
/// Always returns exactly five factors, in report order.
pub fn score(
    crop: &str,
    weather: &WeatherSummary,
    soil: &SoilSummary,
    cfg: &RiskConfig,
) -> Vec<RiskFactor> {
    let water_need = crops::water_requirement_mm_week(crop);

    vec![
        RiskFactor {
            factor: RiskCategory::Weather,
            risk_pct: round1(weather_risk(water_need, weather.rainfall_7d_total)),
        },
        RiskFactor {
            factor: RiskCategory::MarketPrice,
            risk_pct: cfg.market_price_risk,
        },
        RiskFactor {
            factor: RiskCategory::PestDisease,
            risk_pct: round1(pest_risk(weather.temp_7d_avg, weather.humidity_7d_avg)),
        },
        RiskFactor {
            factor: RiskCategory::InputCosts,
            risk_pct: round1(input_cost_risk(soil.ph)),
        },
        RiskFactor {
            factor: RiskCategory::Labor,
            risk_pct: cfg.labor_risk,
        },
    ]
}

/// Mean score and the level it maps to.
pub fn overall(factors: &[RiskFactor]) -> (f64, RiskLevel) {
    let mean = factors.iter().map(|f| f.risk_pct).sum::<f64>() / factors.len().max(1) as f64;
    (mean, RiskLevel::from_score(mean))
}

/// Rainfall deficit against the crop's weekly water requirement,
/// scaled onto 0-40.
fn weather_risk(water_need_mm: f64, rainfall_7d: f64) -> f64 {
    if water_need_mm <= 0.0 {
        return 10.0;
    }
    let deficit_frac = (water_need_mm - rainfall_7d).max(0.0) / water_need_mm;
    (deficit_frac * 40.0).min(40.0)
}

/// Warm, humid spells favour pests: weighted blend of temperature and
/// humidity factors onto 0-25, humidity dominating.
fn pest_risk(temp_c: f64, humidity_pct: f64) -> f64 {
    let t = ((temp_c - 20.0) / 15.0).clamp(0.0, 1.0);
    let h = ((humidity_pct - 50.0) / 40.0).clamp(0.0, 1.0);
    ((0.6 * h + 0.4 * t) * 25.0).min(25.0)
}

/// Soil pH distance from neutral drives amendment cost, onto 0-25.
/// Unknown pH scores a flat 15.
fn input_cost_risk(soil_ph: Option<f64>) -> f64 {
    match soil_ph {
        Some(ph) => ((ph - 7.0).abs() * 5.0).min(25.0),
        None => 15.0,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(rain: f64, temp: f64, humidity: f64) -> WeatherSummary {
        WeatherSummary {
            rainfall_7d_total: rain,
            temp_7d_avg: temp,
            humidity_7d_avg: humidity,
        }
    }

    fn soil_with_ph(ph: f64) -> SoilSummary {
        let mut soil = SoilSummary::unavailable("test");
        soil.ph = Some(ph);
        soil
    }

    #[test]
    fn dry_week_for_rice_scores_high_weather_risk() {
        // need 50mm, got 10mm: 40 * 40/50 = 32.0
        assert_eq!(weather_risk(50.0, 10.0), 32.0);
    }

    #[test]
    fn surplus_rain_scores_zero() {
        assert_eq!(weather_risk(30.0, 45.0), 0.0);
    }

    #[test]
    fn zero_water_need_defaults_to_ten() {
        assert_eq!(weather_risk(0.0, 25.0), 10.0);
    }

    #[test]
    fn warm_humid_week_raises_pest_risk() {
        // t = 10/15, h = 35/40 -> 25 * (0.6*0.875 + 0.4*0.6667) = 19.79...
        let risk = pest_risk(30.0, 85.0);
        assert!((risk - 19.79).abs() < 0.01);
    }

    #[test]
    fn cool_dry_week_has_no_pest_risk() {
        assert_eq!(pest_risk(15.0, 40.0), 0.0);
    }

    #[test]
    fn input_cost_tracks_ph_distance() {
        assert_eq!(input_cost_risk(Some(6.5)), 2.5);
        assert_eq!(input_cost_risk(Some(7.0)), 0.0);
        assert_eq!(input_cost_risk(Some(1.0)), 25.0);
        assert_eq!(input_cost_risk(None), 15.0);
    }

    #[test]
    fn rice_scenario_lands_on_medium() {
        let factors = score(
            "rice",
            &weather(10.0, 30.0, 85.0),
            &soil_with_ph(6.5),
            &RiskConfig::default(),
        );

        assert_eq!(factors.len(), 5);
        assert_eq!(factors[0].risk_pct, 32.0);
        assert_eq!(factors[1].risk_pct, 20.0);
        assert_eq!(factors[2].risk_pct, 19.8);
        assert_eq!(factors[3].risk_pct, 2.5);
        assert_eq!(factors[4].risk_pct, 12.0);

        let (mean, level) = overall(&factors);
        assert!((mean - 17.26).abs() < 0.01);
        assert_eq!(level, RiskLevel::Medium);
    }

    #[test]
    fn all_scores_stay_in_category_range() {
        let extremes = [
            weather(0.0, 60.0, 100.0),
            weather(500.0, -10.0, 0.0),
            weather(0.0, 0.0, 0.0),
        ];
        for w in &extremes {
            let factors = score("rice", w, &soil_with_ph(14.0), &RiskConfig::default());
            for f in &factors {
                assert!(f.in_range(), "{:?} out of range", f);
            }
        }
    }
}
