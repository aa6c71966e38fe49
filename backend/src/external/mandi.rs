//! Mandi price client
//!
//! Pulls the Agmarknet commodity-wise daily report. Upstream price fields
//! arrive as either numbers or strings, so parsing is forgiving; records
//! without a usable modal price are skipped.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shared::PricePoint;

use crate::error::{AppError, AppResult};

/// Agmarknet commodity report client
#[derive(Clone)]
pub struct MandiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MandiReport {
    #[serde(default)]
    records: Vec<MandiRecord>,
}

#[derive(Debug, Deserialize)]
struct MandiRecord {
    #[serde(rename = "Market")]
    market: Option<String>,
    #[serde(rename = "Modal_Price")]
    modal_price: Option<serde_json::Value>,
    #[serde(rename = "Arrival_Date")]
    arrival_date: Option<String>,
}

impl MandiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch modal prices for a commodity over a date window.
    pub async fn daily_report(
        &self,
        commodity: &str,
        state: &str,
        district: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<PricePoint>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("commodity", commodity),
                ("state", state),
                ("district", district),
                ("fromdate", &from.format("%d/%m/%Y").to_string()),
                ("todate", &to.format("%d/%m/%Y").to_string()),
                ("limit", "50"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("mandi request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "mandi API returned {}",
                response.status()
            )));
        }

        let report: MandiReport = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("unexpected mandi response: {}", e)))?;

        Ok(convert_records(report))
    }
}

fn convert_records(report: MandiReport) -> Vec<PricePoint> {
    report
        .records
        .into_iter()
        .filter_map(|record| {
            let price = record.modal_price.as_ref().and_then(parse_price)?;
            Some(PricePoint {
                mandi: record.market.unwrap_or_else(|| "Unknown".to_string()),
                date: record.arrival_date.unwrap_or_default(),
                price_per_quintal: price,
            })
        })
        .collect()
}

fn parse_price(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}
