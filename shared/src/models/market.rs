//! Market price models

use serde::{Deserialize, Serialize};

use crate::types::PriceSource;

/// A single mandi price sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub mandi: String,
    pub date: String,
    pub price_per_quintal: f64,
}

/// Aggregated market price for a crop in a state/district
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    pub crop: String,
    pub state: Option<String>,
    pub district: Option<String>,
    /// Average modal price across sampled mandis (INR per quintal)
    pub avg_price: f64,
    pub source: PriceSource,
    pub prices: Vec<PricePoint>,
}
