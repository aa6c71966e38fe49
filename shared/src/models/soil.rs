//! Soil models

use serde::{Deserialize, Serialize};

/// Point-in-time soil chemistry for a location
///
/// Sand/silt/clay fractions are reported independently and need not sum
/// to 100. When the upstream source has no data for the location the summary
/// degrades to `SoilSummary::unavailable()`, which keeps `degraded` set so
/// downstream reports can tell real readings from defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilSummary {
    pub ph: Option<f64>,
    pub ph_status: PhStatus,
    pub organic_carbon_pct: Option<f64>,
    pub sand_pct: Option<f64>,
    pub silt_pct: Option<f64>,
    pub clay_pct: Option<f64>,
    pub texture: SoilTexture,
    /// True when no soil reading was available and defaults were substituted
    pub degraded: bool,
    pub note: String,
}

impl SoilSummary {
    /// The record substituted when the soil source has nothing for a location.
    pub fn unavailable(note: impl Into<String>) -> Self {
        Self {
            ph: None,
            ph_status: PhStatus::Unknown,
            organic_carbon_pct: None,
            sand_pct: None,
            silt_pct: None,
            clay_pct: None,
            texture: SoilTexture::Unknown,
            degraded: true,
            note: note.into(),
        }
    }
}

/// pH interpretation bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhStatus {
    StronglyAcidic,
    ModeratelyAcidic,
    Neutral,
    SlightlyAlkaline,
    StronglyAlkaline,
    Unknown,
}

impl PhStatus {
    /// Classify a measured pH value.
    pub fn classify(ph: f64) -> Self {
        if ph < 5.5 {
            PhStatus::StronglyAcidic
        } else if ph < 6.5 {
            PhStatus::ModeratelyAcidic
        } else if ph <= 7.5 {
            PhStatus::Neutral
        } else if ph <= 8.5 {
            PhStatus::SlightlyAlkaline
        } else {
            PhStatus::StronglyAlkaline
        }
    }
}

impl std::fmt::Display for PhStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhStatus::StronglyAcidic => write!(f, "Strongly acidic"),
            PhStatus::ModeratelyAcidic => write!(f, "Moderately acidic"),
            PhStatus::Neutral => write!(f, "Neutral"),
            PhStatus::SlightlyAlkaline => write!(f, "Slightly alkaline"),
            PhStatus::StronglyAlkaline => write!(f, "Strongly alkaline"),
            PhStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Coarse soil texture classes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilTexture {
    Sandy,
    Clayey,
    Loamy,
    Unknown,
}

impl SoilTexture {
    /// Classify texture from sand/clay fractions.
    pub fn classify(sand_pct: Option<f64>, clay_pct: Option<f64>) -> Self {
        match (sand_pct, clay_pct) {
            (Some(sand), _) if sand > 70.0 => SoilTexture::Sandy,
            (_, Some(clay)) if clay > 35.0 => SoilTexture::Clayey,
            (None, None) => SoilTexture::Unknown,
            _ => SoilTexture::Loamy,
        }
    }
}

impl std::fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilTexture::Sandy => write!(f, "Sandy"),
            SoilTexture::Clayey => write!(f, "Clayey"),
            SoilTexture::Loamy => write!(f, "Loamy"),
            SoilTexture::Unknown => write!(f, "Unknown"),
        }
    }
}
