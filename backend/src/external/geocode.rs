//! Geocoding client for resolving Indian pincodes
//!
//! Uses OpenStreetMap Nominatim to turn a postal code into coordinates or an
//! administrative state/district pair.

use reqwest::Client;
use serde::Deserialize;
use shared::GpsCoordinates;

use crate::error::{AppError, AppResult};

/// Nominatim geocoding client
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

/// Nominatim search result
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    state: Option<String>,
    county: Option<String>,
    state_district: Option<String>,
    region: Option<String>,
}

impl GeocodeClient {
    pub fn new(base_url: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            user_agent,
        }
    }

    /// Resolve a pincode to approximate coordinates.
    pub async fn coordinates(&self, pincode: &str) -> AppResult<GpsCoordinates> {
        let places = self
            .search(&[
                ("postalcode", pincode),
                ("country", "India"),
                ("format", "json"),
                ("limit", "1"),
            ])
            .await?;

        let place = places
            .first()
            .ok_or_else(|| AppError::GeocodingFailed(format!("no match for pincode {}", pincode)))?;

        let latitude = place
            .lat
            .parse::<f64>()
            .map_err(|e| AppError::GeocodingFailed(format!("bad latitude: {}", e)))?;
        let longitude = place
            .lon
            .parse::<f64>()
            .map_err(|e| AppError::GeocodingFailed(format!("bad longitude: {}", e)))?;

        Ok(GpsCoordinates::new(latitude, longitude))
    }

    /// Resolve a pincode to a (state, district) pair. Either side may be
    /// missing in the upstream address record.
    pub async fn state_district(
        &self,
        pincode: &str,
    ) -> AppResult<(Option<String>, Option<String>)> {
        let places = self
            .search(&[
                ("q", pincode),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
            ])
            .await?;

        let Some(place) = places.into_iter().next() else {
            return Ok((None, None));
        };

        let Some(address) = place.address else {
            return Ok((None, None));
        };

        let district = address
            .county
            .or(address.state_district)
            .or(address.region);

        Ok((address.state, district))
    }

    async fn search(&self, params: &[(&str, &str)]) -> AppResult<Vec<NominatimPlace>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| AppError::GeocodingFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::GeocodingFailed(format!(
                "geocoder returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GeocodingFailed(format!("unexpected response: {}", e)))
    }
}
