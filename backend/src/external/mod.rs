//! External API integrations

pub mod geocode;
pub mod mandi;
pub mod soilgrids;
pub mod weather;

pub use geocode::GeocodeClient;
pub use mandi::MandiClient;
pub use soilgrids::{SoilGridsClient, SoilReading};
pub use weather::PowerClient;
