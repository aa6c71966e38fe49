//! HTTP handlers for the AgriTwin advisory platform

pub mod forecast;
pub mod health;
pub mod irrigation;
pub mod market;
pub mod profile;
pub mod simulator;
pub mod soil;
pub mod weather;

pub use forecast::get_farm_report;
pub use health::health_check;
pub use irrigation::get_irrigation_plan;
pub use market::get_market_price;
pub use profile::{
    activate_profile, create_profile, get_active_profile, get_profile, list_profiles,
    update_profile,
};
pub use simulator::simulate;
pub use soil::get_soil_summary;
pub use weather::{get_weather_summary, get_weather_weekly};
