//! Business logic services for the AgriTwin advisory platform

pub mod crops;
pub mod features;
pub mod forecast;
pub mod growth;
pub mod irrigation;
pub mod market;
pub mod predictor;
pub mod profile;
pub mod risk;
pub mod simulator;
pub mod soil;
pub mod weather;

pub use forecast::ForecastService;
pub use irrigation::IrrigationService;
pub use market::MarketService;
pub use predictor::{YieldModel, YieldPredictor};
pub use profile::ProfileStore;
pub use simulator::ScenarioService;
pub use soil::SoilService;
pub use weather::WeatherService;
