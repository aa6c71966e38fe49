//! Authoritative feature schema for the yield model
//!
//! Both the offline training job and the serving path build their column sets
//! from these constants. The model artifact records the schema it was trained
//! against and the predictor refuses to load an artifact whose columns
//! disagree with this module, so the two can never drift apart silently.
//!
//! Categorical columns are matched by exact string; the placeholder level for
//! a missing value is [`UNKNOWN`] and must stay byte-identical to the string
//! the training job substitutes, or predictions quietly degrade instead of
//! erroring.

/// Placeholder level substituted for a missing categorical value.
pub const UNKNOWN: &str = "Unknown";

// Categorical columns
pub const COL_STATE: &str = "State";
pub const COL_DISTRICT: &str = "District";
pub const COL_CROP: &str = "Crop";
pub const COL_SEASON: &str = "Season";

// Numeric columns
pub const COL_CROP_YEAR: &str = "Crop_Year";
pub const COL_AREA: &str = "Area";
pub const COL_PRODUCTION: &str = "Production";
pub const COL_RAINFALL_7D: &str = "rainfall_7d_total";
pub const COL_TEMP_7D: &str = "temp_7d_avg";
pub const COL_HUMIDITY_7D: &str = "humidity_7d_avg";
pub const COL_SOIL_PH: &str = "soil_ph";
pub const COL_SOIL_SOC: &str = "soil_soc";
pub const COL_SOIL_SAND: &str = "soil_sand";
pub const COL_SOIL_SILT: &str = "soil_silt";
pub const COL_SOIL_CLAY: &str = "soil_clay";

/// Categorical columns, in canonical order.
pub const CATEGORICAL_COLUMNS: [&str; 4] = [COL_STATE, COL_DISTRICT, COL_CROP, COL_SEASON];

/// Numeric columns, in canonical order.
pub const NUMERIC_COLUMNS: [&str; 11] = [
    COL_CROP_YEAR,
    COL_AREA,
    COL_PRODUCTION,
    COL_RAINFALL_7D,
    COL_TEMP_7D,
    COL_HUMIDITY_7D,
    COL_SOIL_PH,
    COL_SOIL_SOC,
    COL_SOIL_SAND,
    COL_SOIL_SILT,
    COL_SOIL_CLAY,
];

/// True if `name` is one of the categorical columns.
pub fn is_categorical(name: &str) -> bool {
    CATEGORICAL_COLUMNS.contains(&name)
}

/// True if `name` is one of the numeric columns.
pub fn is_numeric(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_sets_are_disjoint() {
        for c in CATEGORICAL_COLUMNS {
            assert!(!is_numeric(c), "{c} appears in both column sets");
        }
    }

    #[test]
    fn no_duplicate_columns() {
        let mut all: Vec<&str> = CATEGORICAL_COLUMNS
            .iter()
            .chain(NUMERIC_COLUMNS.iter())
            .copied()
            .collect();
        let before = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(before, all.len());
    }
}
