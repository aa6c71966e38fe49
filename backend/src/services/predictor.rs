//! Yield predictor
//!
//! Wraps the regression model exported by the offline training job. The
//! artifact is loaded once at startup and shared read-only across requests;
//! a missing or corrupt artifact is fatal then, never per-request.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::schema::{CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

use crate::error::{AppError, AppResult};
use crate::services::features::FeatureRow;

/// A trained yield model. Implementations must be stateless across calls:
/// the same row always produces the same estimate.
pub trait YieldModel: Send + Sync {
    /// Estimate total yield in quintals for the row's declared area.
    /// The output is not guaranteed non-negative; callers clamp or fall back.
    fn predict(&self, row: &FeatureRow) -> f64;
}

/// Per-column term of a numeric feature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericTerm {
    pub weight: f64,
    pub center: f64,
    pub scale: f64,
}

/// Learned effects for one categorical column, keyed by exact level string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalTerm {
    pub effects: BTreeMap<String, f64>,
    /// Effect applied for levels never seen in training
    #[serde(default)]
    pub default_effect: f64,
}

/// Serialized model artifact written by the training job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub target: String,
    pub intercept: f64,
    pub numeric: BTreeMap<String, NumericTerm>,
    pub categorical: BTreeMap<String, CategoricalTerm>,
}

impl ModelArtifact {
    /// Load and validate an artifact from disk.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|e| {
            AppError::ModelUnavailable(format!("corrupt artifact {}: {}", path.display(), e))
        })?;

        artifact.validate_schema()?;
        Ok(artifact)
    }

    /// The artifact's columns must match the shared schema exactly; anything
    /// else means training and serving have drifted apart.
    fn validate_schema(&self) -> AppResult<()> {
        for col in NUMERIC_COLUMNS {
            if !self.numeric.contains_key(col) {
                return Err(AppError::ModelUnavailable(format!(
                    "artifact is missing numeric column {col}"
                )));
            }
        }
        for col in CATEGORICAL_COLUMNS {
            if !self.categorical.contains_key(col) {
                return Err(AppError::ModelUnavailable(format!(
                    "artifact is missing categorical column {col}"
                )));
            }
        }
        for col in self.numeric.keys() {
            if !NUMERIC_COLUMNS.contains(&col.as_str()) {
                return Err(AppError::ModelUnavailable(format!(
                    "artifact has unknown numeric column {col}"
                )));
            }
        }
        for col in self.categorical.keys() {
            if !CATEGORICAL_COLUMNS.contains(&col.as_str()) {
                return Err(AppError::ModelUnavailable(format!(
                    "artifact has unknown categorical column {col}"
                )));
            }
        }
        Ok(())
    }
}

impl YieldModel for ModelArtifact {
    fn predict(&self, row: &FeatureRow) -> f64 {
        let mut estimate = self.intercept;

        for (col, term) in &self.numeric {
            let value = row.numeric(col).unwrap_or(0.0);
            let scale = if term.scale == 0.0 { 1.0 } else { term.scale };
            estimate += term.weight * (value - term.center) / scale;
        }

        for (col, term) in &self.categorical {
            let effect = row
                .categorical(col)
                .and_then(|level| term.effects.get(level).copied())
                .unwrap_or(term.default_effect);
            estimate += effect;
        }

        estimate
    }
}

/// Shared, read-only predictor handle
///
/// The model is injected rather than loaded from a module-level singleton so
/// tests can substitute stubs.
#[derive(Clone)]
pub struct YieldPredictor {
    model: Arc<dyn YieldModel>,
}

impl YieldPredictor {
    pub fn new(model: Arc<dyn YieldModel>) -> Self {
        Self { model }
    }

    /// Load the production artifact. Called once at startup; failure must
    /// stop the process from serving.
    pub fn from_artifact(path: &Path) -> AppResult<Self> {
        let artifact = ModelArtifact::load(path)?;
        tracing::info!(
            path = %path.display(),
            version = artifact.version,
            target = %artifact.target,
            "yield model loaded"
        );
        Ok(Self::new(Arc::new(artifact)))
    }

    pub fn predict(&self, row: &FeatureRow) -> f64 {
        self.model.predict(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::features::{assemble, FieldContext};
    use shared::schema::{COL_AREA, COL_CROP};
    use shared::{SoilSummary, WeatherSummary};

    fn artifact() -> ModelArtifact {
        let mut numeric = BTreeMap::new();
        for col in NUMERIC_COLUMNS {
            numeric.insert(
                col.to_string(),
                NumericTerm {
                    weight: 0.0,
                    center: 0.0,
                    scale: 1.0,
                },
            );
        }
        numeric.insert(
            COL_AREA.to_string(),
            NumericTerm {
                weight: 10.0,
                center: 0.0,
                scale: 1.0,
            },
        );

        let mut categorical = BTreeMap::new();
        for col in CATEGORICAL_COLUMNS {
            categorical.insert(
                col.to_string(),
                CategoricalTerm {
                    effects: BTreeMap::new(),
                    default_effect: 0.0,
                },
            );
        }
        categorical.insert(
            COL_CROP.to_string(),
            CategoricalTerm {
                effects: [("rice".to_string(), 5.0)].into_iter().collect(),
                default_effect: -1.0,
            },
        );

        ModelArtifact {
            version: 1,
            target: "yield_qtl".to_string(),
            intercept: 2.0,
            numeric,
            categorical,
        }
    }

    fn row_for(crop: &str, area: f64) -> FeatureRow {
        let context = FieldContext {
            crop: Some(crop.to_string()),
            crop_year: 2025,
            area_hectares: area,
            ..FieldContext::default()
        };
        assemble(
            &context,
            &WeatherSummary::default(),
            &SoilSummary::unavailable("test"),
        )
    }

    #[test]
    fn linear_terms_and_effects_add_up() {
        let model = artifact();
        // intercept 2 + area 2*10 + rice effect 5
        assert_eq!(model.predict(&row_for("rice", 2.0)), 27.0);
        // unseen crop level falls back to the default effect
        assert_eq!(model.predict(&row_for("banana", 2.0)), 21.0);
    }

    #[test]
    fn prediction_is_deterministic() {
        let predictor = YieldPredictor::new(Arc::new(artifact()));
        let row = row_for("rice", 1.0);
        let first = predictor.predict(&row);
        for _ in 0..10 {
            assert_eq!(predictor.predict(&row), first);
        }
    }

    #[test]
    fn zero_scale_does_not_divide_by_zero() {
        let mut model = artifact();
        model.numeric.get_mut(COL_AREA).unwrap().scale = 0.0;
        let estimate = model.predict(&row_for("rice", 2.0));
        assert!(estimate.is_finite());
    }

    #[test]
    fn artifact_schema_mismatch_is_rejected() {
        let mut model = artifact();
        model.numeric.remove(COL_AREA);
        assert!(model.validate_schema().is_err());

        let mut model = artifact();
        model.numeric.insert(
            "bogus_column".to_string(),
            NumericTerm {
                weight: 1.0,
                center: 0.0,
                scale: 1.0,
            },
        );
        assert!(model.validate_schema().is_err());
    }
}
