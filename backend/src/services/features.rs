//! Feature assembly for the yield model
//!
//! Merges a field context, a weather summary and a soil summary into the one
//! canonical row the predictor consumes. The assembler is the only way to
//! build a [`FeatureRow`], which keeps two invariants: every schema column is
//! present, and categorical values are never empty (missing ones become the
//! schema's `Unknown` placeholder, matching what the training job writes).
//!
//! Out-of-range values pass through untouched; robustness to outliers is the
//! model's job, not the assembler's.

use std::collections::BTreeMap;

use shared::schema::{
    self, COL_AREA, COL_CROP, COL_CROP_YEAR, COL_DISTRICT, COL_HUMIDITY_7D, COL_PRODUCTION,
    COL_RAINFALL_7D, COL_SEASON, COL_SOIL_CLAY, COL_SOIL_PH, COL_SOIL_SAND, COL_SOIL_SILT,
    COL_SOIL_SOC, COL_STATE, COL_TEMP_7D,
};
use shared::{SoilSummary, WeatherSummary};

// Numeric defaults substituted for missing soil readings
const DEFAULT_SOIL_PH: f64 = 7.0;
const DEFAULT_SOIL_SOC: f64 = 0.5;
const DEFAULT_SOIL_SAND: f64 = 33.0;
const DEFAULT_SOIL_SILT: f64 = 33.0;
const DEFAULT_SOIL_CLAY: f64 = 34.0;

/// The farm/crop side of a feature row
#[derive(Debug, Clone, Default)]
pub struct FieldContext {
    pub state: Option<String>,
    pub district: Option<String>,
    pub crop: Option<String>,
    pub season: Option<String>,
    pub crop_year: i32,
    pub area_hectares: f64,
    pub production_so_far: f64,
}

/// One prediction-ready row, keyed by the shared schema columns
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    categorical: BTreeMap<&'static str, String>,
    numeric: BTreeMap<&'static str, f64>,
}

impl FeatureRow {
    pub fn categorical(&self, column: &str) -> Option<&str> {
        self.categorical.get(column).map(String::as_str)
    }

    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.numeric.get(column).copied()
    }

    pub fn categoricals(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.categorical.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn numerics(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.numeric.iter().map(|(k, v)| (*k, *v))
    }
}

/// Build the canonical feature row for one prediction.
pub fn assemble(
    context: &FieldContext,
    weather: &WeatherSummary,
    soil: &SoilSummary,
) -> FeatureRow {
    let mut categorical = BTreeMap::new();
    categorical.insert(COL_STATE, coerce_level(context.state.as_deref()));
    categorical.insert(COL_DISTRICT, coerce_level(context.district.as_deref()));
    categorical.insert(COL_CROP, coerce_level(context.crop.as_deref()));
    categorical.insert(COL_SEASON, coerce_level(context.season.as_deref()));

    let mut numeric = BTreeMap::new();
    numeric.insert(COL_CROP_YEAR, context.crop_year as f64);
    numeric.insert(COL_AREA, finite_or_zero(context.area_hectares));
    numeric.insert(COL_PRODUCTION, finite_or_zero(context.production_so_far));
    numeric.insert(COL_RAINFALL_7D, finite_or_zero(weather.rainfall_7d_total));
    numeric.insert(COL_TEMP_7D, finite_or_zero(weather.temp_7d_avg));
    numeric.insert(COL_HUMIDITY_7D, finite_or_zero(weather.humidity_7d_avg));
    numeric.insert(COL_SOIL_PH, soil.ph.unwrap_or(DEFAULT_SOIL_PH));
    numeric.insert(
        COL_SOIL_SOC,
        soil.organic_carbon_pct.unwrap_or(DEFAULT_SOIL_SOC),
    );
    numeric.insert(COL_SOIL_SAND, soil.sand_pct.unwrap_or(DEFAULT_SOIL_SAND));
    numeric.insert(COL_SOIL_SILT, soil.silt_pct.unwrap_or(DEFAULT_SOIL_SILT));
    numeric.insert(COL_SOIL_CLAY, soil.clay_pct.unwrap_or(DEFAULT_SOIL_CLAY));

    FeatureRow {
        categorical,
        numeric,
    }
}

/// Coerce an optional categorical into a non-empty level. The placeholder
/// must stay byte-identical to the training-time substitute.
fn coerce_level(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => schema::UNKNOWN.to_string(),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::schema::{CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

    fn bare_context() -> FieldContext {
        FieldContext {
            crop_year: 2025,
            area_hectares: 1.5,
            ..FieldContext::default()
        }
    }

    #[test]
    fn every_schema_column_is_present() {
        let row = assemble(
            &bare_context(),
            &WeatherSummary::default(),
            &SoilSummary::unavailable("test"),
        );

        for col in CATEGORICAL_COLUMNS {
            assert!(row.categorical(col).is_some(), "missing {col}");
        }
        for col in NUMERIC_COLUMNS {
            assert!(row.numeric(col).is_some(), "missing {col}");
        }
    }

    #[test]
    fn missing_categoricals_become_unknown() {
        let row = assemble(
            &bare_context(),
            &WeatherSummary::default(),
            &SoilSummary::unavailable("test"),
        );

        assert_eq!(row.categorical(COL_STATE), Some("Unknown"));
        assert_eq!(row.categorical(COL_CROP), Some("Unknown"));
        for (_, level) in row.categoricals() {
            assert!(!level.is_empty());
        }
    }

    #[test]
    fn blank_categorical_is_treated_as_missing() {
        let context = FieldContext {
            crop: Some("  ".to_string()),
            ..bare_context()
        };
        let row = assemble(
            &context,
            &WeatherSummary::default(),
            &SoilSummary::unavailable("test"),
        );
        assert_eq!(row.categorical(COL_CROP), Some("Unknown"));
    }

    #[test]
    fn degraded_soil_uses_documented_defaults() {
        let row = assemble(
            &bare_context(),
            &WeatherSummary::default(),
            &SoilSummary::unavailable("test"),
        );

        assert_eq!(row.numeric(COL_SOIL_PH), Some(7.0));
        assert_eq!(row.numeric(COL_SOIL_SOC), Some(0.5));
        assert_eq!(row.numeric(COL_SOIL_SAND), Some(33.0));
        assert_eq!(row.numeric(COL_SOIL_SILT), Some(33.0));
        assert_eq!(row.numeric(COL_SOIL_CLAY), Some(34.0));
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let weather = WeatherSummary {
            rainfall_7d_total: -4.0,
            temp_7d_avg: 61.0,
            humidity_7d_avg: 140.0,
        };
        let mut soil = SoilSummary::unavailable("test");
        soil.ph = Some(14.0);

        let row = assemble(&bare_context(), &weather, &soil);
        assert_eq!(row.numeric(COL_RAINFALL_7D), Some(-4.0));
        assert_eq!(row.numeric(COL_TEMP_7D), Some(61.0));
        assert_eq!(row.numeric(COL_SOIL_PH), Some(14.0));
    }
}
