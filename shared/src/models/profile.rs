//! Farmer profile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A farmer profile: identity plus the agronomic context every forecast
/// starts from. Owned by the profile store; the forecasting core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    /// Postal code used to resolve coordinates for weather and soil lookups
    pub pincode: String,
    pub state: Option<String>,
    pub district: Option<String>,
    /// Primary crop for the coming season
    pub crop: Option<String>,
    /// Kharif / Rabi / Annual; left empty to use the crop's default season
    pub season: Option<String>,
    pub area_hectares: f64,
    pub sms_alerts: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
