//! Soil properties client
//!
//! Queries the ISRIC SoilGrids API for topsoil chemistry. Urban and water
//! cells often carry no data, so lookups fall back to a widening ring search
//! around the requested point.

use reqwest::Client;
use serde::Deserialize;
use shared::GpsCoordinates;

use crate::error::{AppError, AppResult};

/// Kilometers per degree of latitude, good enough for small offsets
const KM_PER_DEGREE: f64 = 111.0;

/// SoilGrids properties client
#[derive(Clone)]
pub struct SoilGridsClient {
    client: Client,
    base_url: String,
}

/// Parsed topsoil reading (0-5 cm means, converted to conventional units)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoilReading {
    pub ph: Option<f64>,
    pub organic_carbon_pct: Option<f64>,
    pub sand_pct: Option<f64>,
    pub silt_pct: Option<f64>,
    pub clay_pct: Option<f64>,
}

impl SoilReading {
    /// True when the cell had at least a pH value.
    pub fn has_data(&self) -> bool {
        self.ph.is_some()
    }
}

/// SoilGrids response envelope
#[derive(Debug, Deserialize)]
struct SoilGridsResponse {
    properties: SoilGridsProperties,
}

#[derive(Debug, Deserialize)]
struct SoilGridsProperties {
    #[serde(default)]
    layers: Vec<SoilGridsLayer>,
}

#[derive(Debug, Deserialize)]
struct SoilGridsLayer {
    name: String,
    #[serde(default)]
    depths: Vec<SoilGridsDepth>,
}

#[derive(Debug, Deserialize)]
struct SoilGridsDepth {
    values: SoilGridsValues,
}

#[derive(Debug, Deserialize)]
struct SoilGridsValues {
    mean: Option<f64>,
}

impl SoilGridsClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Query the topsoil properties at a point.
    pub async fn properties(&self, coords: GpsCoordinates) -> AppResult<SoilReading> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("depth", "0-5cm".to_string()),
                ("value", "mean".to_string()),
            ])
            .query(&[
                ("property", "phh2o"),
                ("property", "soc"),
                ("property", "sand"),
                ("property", "silt"),
                ("property", "clay"),
            ])
            .send()
            .await
            .map_err(|e| AppError::SoilServiceUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::SoilServiceUnavailable(format!(
                "soil API returned {}",
                response.status()
            )));
        }

        let data: SoilGridsResponse = response
            .json()
            .await
            .map_err(|e| AppError::SoilServiceUnavailable(format!("unexpected response: {}", e)))?;

        Ok(convert_reading(data))
    }

    /// Find the nearest cell with data, widening the search radius in
    /// `step_km` rings up to `max_km`. Returns the reading plus the distance
    /// (km) at which it was found.
    pub async fn nearest_reading(
        &self,
        coords: GpsCoordinates,
        max_km: u32,
        step_km: u32,
    ) -> AppResult<Option<(SoilReading, u32)>> {
        let step = step_km.max(1);

        let mut radius = 0;
        while radius <= max_km {
            for bearing_deg in (0..360).step_by(45) {
                let angle = (bearing_deg as f64).to_radians();
                let offset = radius as f64 / KM_PER_DEGREE;
                let probe = GpsCoordinates::new(
                    coords.latitude + offset * angle.sin(),
                    coords.longitude + offset * angle.cos(),
                );

                let reading = self.properties(probe).await?;
                if reading.has_data() {
                    return Ok(Some((reading, radius)));
                }

                // The center point is the same for every bearing
                if radius == 0 {
                    break;
                }
            }
            radius += step;
        }

        Ok(None)
    }
}

/// Convert SoilGrids mapped units to conventional ones:
/// pH*10 -> pH, soc in dg/kg -> %, texture fractions in g/kg -> %.
fn convert_reading(data: SoilGridsResponse) -> SoilReading {
    let mut reading = SoilReading::default();

    for layer in data.properties.layers {
        let mean = layer
            .depths
            .first()
            .and_then(|d| d.values.mean);
        let Some(mean) = mean else { continue };

        match layer.name.as_str() {
            "phh2o" => reading.ph = Some(mean / 10.0),
            "soc" => reading.organic_carbon_pct = Some(mean / 100.0),
            "sand" => reading.sand_pct = Some(mean / 10.0),
            "silt" => reading.silt_pct = Some(mean / 10.0),
            "clay" => reading.clay_pct = Some(mean / 10.0),
            _ => {}
        }
    }

    reading
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &str, mean: Option<f64>) -> SoilGridsLayer {
        SoilGridsLayer {
            name: name.to_string(),
            depths: vec![SoilGridsDepth {
                values: SoilGridsValues { mean },
            }],
        }
    }

    #[test]
    fn converts_mapped_units() {
        let data = SoilGridsResponse {
            properties: SoilGridsProperties {
                layers: vec![
                    layer("phh2o", Some(65.0)),
                    layer("soc", Some(120.0)),
                    layer("sand", Some(450.0)),
                    layer("silt", Some(300.0)),
                    layer("clay", Some(250.0)),
                ],
            },
        };

        let reading = convert_reading(data);
        assert_eq!(reading.ph, Some(6.5));
        assert_eq!(reading.organic_carbon_pct, Some(1.2));
        assert_eq!(reading.sand_pct, Some(45.0));
        assert_eq!(reading.silt_pct, Some(30.0));
        assert_eq!(reading.clay_pct, Some(25.0));
        assert!(reading.has_data());
    }

    #[test]
    fn empty_cell_has_no_data() {
        let data = SoilGridsResponse {
            properties: SoilGridsProperties {
                layers: vec![layer("phh2o", None)],
            },
        };
        assert!(!convert_reading(data).has_data());
    }
}
