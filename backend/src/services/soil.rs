//! Soil adapter
//!
//! Resolves a pincode to coordinates and summarizes SoilGrids topsoil
//! chemistry. Urban pincodes often sit on cells with no data, so the lookup
//! widens its search ring before giving up; when nothing is found (or the
//! upstream source is down) the summary degrades to the documented default
//! record with its `degraded` flag set, and the forecast proceeds.

use std::path::PathBuf;

use chrono::Utc;
use shared::{PhStatus, SoilSummary, SoilTexture};

use crate::error::AppResult;
use crate::external::{GeocodeClient, SoilGridsClient, SoilReading};

/// Soil adapter service
#[derive(Clone)]
pub struct SoilService {
    client: SoilGridsClient,
    geocode: GeocodeClient,
    cache_dir: PathBuf,
    max_search_km: u32,
    search_step_km: u32,
}

impl SoilService {
    pub fn new(
        client: SoilGridsClient,
        geocode: GeocodeClient,
        cache_dir: impl Into<PathBuf>,
        max_search_km: u32,
        search_step_km: u32,
    ) -> Self {
        Self {
            client,
            geocode,
            cache_dir: cache_dir.into(),
            max_search_km,
            search_step_km,
        }
    }

    /// Soil summary for a pincode. Upstream failures degrade to the default
    /// record instead of erroring; only the degraded flag and note tell the
    /// difference.
    pub async fn summary(&self, pincode: &str) -> AppResult<SoilSummary> {
        let today = Utc::now().date_naive();
        let cache_path = self
            .cache_dir
            .join(format!("soil_{}_{}.json", pincode, today.format("%Y%m%d")));

        if let Ok(raw) = std::fs::read_to_string(&cache_path) {
            if let Ok(summary) = serde_json::from_str::<SoilSummary>(&raw) {
                tracing::debug!(pincode, "soil cache hit");
                return Ok(summary);
            }
            tracing::debug!(pincode, "soil cache unreadable, refetching");
        }

        let summary = self.fetch_summary(pincode).await;

        if let Err(e) = self.write_cache(&cache_path, &summary) {
            tracing::warn!(pincode, error = %e, "could not cache soil summary");
        }

        Ok(summary)
    }

    async fn fetch_summary(&self, pincode: &str) -> SoilSummary {
        let coords = match self.geocode.coordinates(pincode).await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!(pincode, error = %e, "soil lookup could not resolve pincode");
                return SoilSummary::unavailable(format!(
                    "Could not resolve pincode {} to a location",
                    pincode
                ));
            }
        };

        match self
            .client
            .nearest_reading(coords, self.max_search_km, self.search_step_km)
            .await
        {
            Ok(Some((reading, distance_km))) => {
                tracing::info!(pincode, distance_km, "soil reading found");
                summarize_reading(reading, distance_km)
            }
            Ok(None) => SoilSummary::unavailable(format!(
                "No soil data within {} km of pincode {}; it may be in a city or urban area",
                self.max_search_km, pincode
            )),
            Err(e) => {
                tracing::warn!(pincode, error = %e, "soil source unavailable");
                SoilSummary::unavailable(format!("Soil source unavailable: {}", e))
            }
        }
    }

    fn write_cache(&self, path: &std::path::Path, summary: &SoilSummary) -> AppResult<()> {
        std::fs::create_dir_all(&self.cache_dir)?;
        std::fs::write(path, serde_json::to_string(summary)?)?;
        Ok(())
    }
}

/// Build a display-ready summary from a raw reading.
pub fn summarize_reading(reading: SoilReading, distance_km: u32) -> SoilSummary {
    let ph = reading.ph.map(round1);
    let ph_status = ph.map(PhStatus::classify).unwrap_or(PhStatus::Unknown);
    let texture = SoilTexture::classify(reading.sand_pct, reading.clay_pct);

    let note = if distance_km == 0 {
        "Direct match".to_string()
    } else {
        format!("Data taken from {} km away", distance_km)
    };

    SoilSummary {
        ph,
        ph_status,
        organic_carbon_pct: reading.organic_carbon_pct.map(round2),
        sand_pct: reading.sand_pct,
        silt_pct: reading.silt_pct,
        clay_pct: reading.clay_pct,
        texture,
        degraded: ph.is_none(),
        note,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
