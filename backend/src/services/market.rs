//! Market price adapter
//!
//! Averages mandi modal prices for a crop over the trailing week. The mandi
//! report is flaky, so any upstream failure (or an empty report) falls back
//! to the static base-price table; the quote's `source` says which path
//! produced it.

use chrono::{Duration, Utc};
use shared::{MarketQuote, PricePoint, PriceSource};

use crate::external::{GeocodeClient, MandiClient};
use crate::services::crops;

/// Market price adapter service
#[derive(Clone)]
pub struct MarketService {
    client: MandiClient,
    geocode: GeocodeClient,
}

impl MarketService {
    pub fn new(client: MandiClient, geocode: GeocodeClient) -> Self {
        Self { client, geocode }
    }

    /// Average price for a crop in a state/district. Never fails: a dead or
    /// empty upstream degrades to the base-price table.
    pub async fn quote(
        &self,
        crop: &str,
        state: Option<&str>,
        district: Option<&str>,
    ) -> MarketQuote {
        let today = Utc::now().date_naive();
        let from = today - Duration::days(7);
        let state_q = state.unwrap_or_default();
        let district_q = district.unwrap_or_default();

        match self
            .client
            .daily_report(crop, state_q, district_q, from, today)
            .await
        {
            Ok(prices) if !prices.is_empty() => {
                let avg = prices.iter().map(|p| p.price_per_quintal).sum::<f64>()
                    / prices.len() as f64;
                tracing::debug!(crop, mandis = prices.len(), avg, "mandi prices fetched");
                MarketQuote {
                    crop: crop.to_string(),
                    state: state.map(str::to_string),
                    district: district.map(str::to_string),
                    avg_price: (avg * 100.0).round() / 100.0,
                    source: PriceSource::Mandi,
                    prices,
                }
            }
            Ok(_) => {
                tracing::debug!(crop, "mandi report empty, using base prices");
                self.fallback_quote(crop, state, district)
            }
            Err(e) => {
                tracing::warn!(crop, error = %e, "mandi report unavailable, using base prices");
                self.fallback_quote(crop, state, district)
            }
        }
    }

    /// Like [`quote`](Self::quote), resolving state/district from a pincode
    /// first when they are not already known.
    pub async fn quote_for_pincode(
        &self,
        crop: &str,
        pincode: &str,
        state: Option<&str>,
        district: Option<&str>,
    ) -> MarketQuote {
        if state.is_some() || district.is_some() {
            return self.quote(crop, state, district).await;
        }

        let (resolved_state, resolved_district) =
            self.geocode.state_district(pincode).await.unwrap_or_else(|e| {
                tracing::debug!(pincode, error = %e, "could not resolve state/district");
                (None, None)
            });

        self.quote(
            crop,
            resolved_state.as_deref(),
            resolved_district.as_deref(),
        )
        .await
    }

    fn fallback_quote(
        &self,
        crop: &str,
        state: Option<&str>,
        district: Option<&str>,
    ) -> MarketQuote {
        let avg_price = crops::base_price_per_quintal(crop);
        let today = Utc::now().date_naive();

        MarketQuote {
            crop: crop.to_string(),
            state: state.map(str::to_string),
            district: district.map(str::to_string),
            avg_price,
            source: PriceSource::Fallback,
            prices: vec![PricePoint {
                mandi: "Base price table".to_string(),
                date: today.to_string(),
                price_per_quintal: avg_price,
            }],
        }
    }
}
