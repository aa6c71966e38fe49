//! Crop reference tables
//!
//! One canonical home for the per-crop constants used across forecasting,
//! risk scoring and irrigation planning. Lookups are case-insensitive and
//! every table carries a default for crops it does not know.

/// Static metadata for a crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropMeta {
    /// Sowing-to-harvest duration (days)
    pub duration_days: u32,
    /// Season the crop is normally grown in
    pub default_season: &'static str,
    /// Baseline market price (INR per quintal)
    pub default_price: f64,
}

const CROP_META: [(&str, CropMeta); 7] = [
    ("rice", CropMeta { duration_days: 120, default_season: "Kharif", default_price: 2200.0 }),
    ("wheat", CropMeta { duration_days: 120, default_season: "Rabi", default_price: 2100.0 }),
    ("maize", CropMeta { duration_days: 110, default_season: "Kharif", default_price: 1800.0 }),
    ("cotton", CropMeta { duration_days: 160, default_season: "Kharif", default_price: 6000.0 }),
    ("sugarcane", CropMeta { duration_days: 300, default_season: "Annual", default_price: 300.0 }),
    ("pulses", CropMeta { duration_days: 100, default_season: "Kharif", default_price: 5000.0 }),
    ("millets", CropMeta { duration_days: 90, default_season: "Kharif", default_price: 2000.0 }),
];

/// Weekly crop water requirement (mm)
const WATER_REQUIREMENT: [(&str, f64); 7] = [
    ("rice", 50.0),
    ("wheat", 30.0),
    ("maize", 35.0),
    ("sugarcane", 60.0),
    ("cotton", 40.0),
    ("pulses", 25.0),
    ("millets", 20.0),
];

/// Safety-net yields (quintals per hectare) substituted when the model
/// returns a degenerate (non-positive) estimate
const FALLBACK_YIELD: [(&str, f64); 7] = [
    ("rice", 25.0),
    ("wheat", 20.0),
    ("maize", 18.0),
    ("cotton", 12.0),
    ("sugarcane", 80.0),
    ("pulses", 10.0),
    ("millets", 15.0),
];

pub const DEFAULT_DURATION_DAYS: u32 = 120;
pub const DEFAULT_SEASON: &str = "Kharif";
pub const DEFAULT_PRICE: f64 = 2000.0;
pub const DEFAULT_WATER_REQUIREMENT: f64 = 30.0;
pub const DEFAULT_FALLBACK_YIELD: f64 = 15.0;

fn lookup<T: Copy>(table: &[(&str, T)], crop: &str) -> Option<T> {
    let crop = crop.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, value)| *value)
}

/// Metadata for a crop, falling back to generic values for unknown crops.
/// `fallback_price` overrides the generic price when the caller has a better
/// baseline at hand.
pub fn crop_meta(crop: &str, fallback_price: Option<f64>) -> CropMeta {
    lookup(&CROP_META, crop).unwrap_or(CropMeta {
        duration_days: DEFAULT_DURATION_DAYS,
        default_season: DEFAULT_SEASON,
        default_price: fallback_price.unwrap_or(DEFAULT_PRICE),
    })
}

/// Weekly water requirement in mm, defaulting to 30 for unknown crops.
pub fn water_requirement_mm_week(crop: &str) -> f64 {
    lookup(&WATER_REQUIREMENT, crop).unwrap_or(DEFAULT_WATER_REQUIREMENT)
}

/// Fallback yield in quintals per hectare, defaulting to 15.
pub fn fallback_yield_qtl_per_ha(crop: &str) -> f64 {
    lookup(&FALLBACK_YIELD, crop).unwrap_or(DEFAULT_FALLBACK_YIELD)
}

/// Baseline price in INR per quintal, defaulting to 2000.
pub fn base_price_per_quintal(crop: &str) -> f64 {
    lookup(&CROP_META, crop)
        .map(|meta| meta.default_price)
        .unwrap_or(DEFAULT_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_case_insensitive() {
        assert_eq!(water_requirement_mm_week("RICE"), 50.0);
        assert_eq!(water_requirement_mm_week(" Rice "), 50.0);
        assert_eq!(fallback_yield_qtl_per_ha("Sugarcane"), 80.0);
    }

    #[test]
    fn unknown_crops_use_defaults() {
        assert_eq!(water_requirement_mm_week("quinoa"), 30.0);
        assert_eq!(fallback_yield_qtl_per_ha("quinoa"), 15.0);
        assert_eq!(base_price_per_quintal("quinoa"), 2000.0);

        let meta = crop_meta("quinoa", Some(2500.0));
        assert_eq!(meta.duration_days, 120);
        assert_eq!(meta.default_season, "Kharif");
        assert_eq!(meta.default_price, 2500.0);
    }

    #[test]
    fn known_crop_meta() {
        let meta = crop_meta("wheat", None);
        assert_eq!(meta.duration_days, 120);
        assert_eq!(meta.default_season, "Rabi");
        assert_eq!(meta.default_price, 2100.0);
    }
}
