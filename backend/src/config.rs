//! Configuration management for the AgriTwin advisory platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Local data paths (profile store, adapter caches)
    pub data: DataConfig,

    /// Yield model configuration
    pub model: ModelConfig,

    /// Weather data source configuration
    pub weather: WeatherApiConfig,

    /// Soil data source configuration
    pub soil: SoilApiConfig,

    /// Mandi price source configuration
    pub market: MarketApiConfig,

    /// Risk scoring constants
    pub risk: RiskConfig,

    /// Scenario simulator tuning
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// JSON file holding farmer profiles
    pub profiles_path: String,

    /// Directory for cached weather/soil responses
    pub cache_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Path to the trained yield model artifact (JSON)
    pub artifact_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherApiConfig {
    /// NASA POWER daily-point endpoint
    pub base_url: String,

    /// Nominatim geocoding endpoint
    pub geocode_url: String,

    /// User-Agent sent to the geocoder (required by its usage policy)
    pub user_agent: String,

    /// Days of daily history to fetch per location
    pub history_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SoilApiConfig {
    /// SoilGrids properties endpoint
    pub base_url: String,

    /// Maximum ring-search radius when the exact cell has no data (km)
    pub max_search_km: u32,

    /// Ring-search step (km)
    pub search_step_km: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketApiConfig {
    /// Agmarknet commodity report endpoint
    pub base_url: String,
}

/// Risk scoring constants
///
/// Market-price and labor risks have no live signal yet; the flat scores are
/// placeholders kept configurable until a volatility feed lands.
#[derive(Debug, Deserialize, Clone)]
pub struct RiskConfig {
    pub market_price_risk: f64,
    pub labor_risk: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    /// Number of weeks in a what-if growth curve
    pub weeks: u32,

    /// Per-month multiplicative noise bound (0.10 = plus/minus 10%)
    pub monthly_noise_pct: f64,

    /// Per-week additive noise bound, in quintals
    pub weekly_noise_abs: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("data.profiles_path", "data/profiles.json")?
            .set_default("data.cache_dir", "data/cache")?
            .set_default("model.artifact_path", "ml/artifacts/yield_model.json")?
            .set_default(
                "weather.base_url",
                "https://power.larc.nasa.gov/api/temporal/daily/point",
            )?
            .set_default(
                "weather.geocode_url",
                "https://nominatim.openstreetmap.org/search",
            )?
            .set_default("weather.user_agent", "AgriTwin/1.0")?
            .set_default("weather.history_days", 30)?
            .set_default(
                "soil.base_url",
                "https://rest.isric.org/soilgrids/v2.0/properties/query",
            )?
            .set_default("soil.max_search_km", 20)?
            .set_default("soil.search_step_km", 2)?
            .set_default(
                "market.base_url",
                "https://agmarknet.gov.in/api/Report/CommodityWiseDailyReport",
            )?
            .set_default("risk.market_price_risk", 20.0)?
            .set_default("risk.labor_risk", 12.0)?
            .set_default("simulator.weeks", 10)?
            .set_default("simulator.monthly_noise_pct", 0.10)?
            .set_default("simulator.weekly_noise_abs", 2.0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            market_price_risk: 20.0,
            labor_risk: 12.0,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            weeks: 10,
            monthly_noise_pct: 0.10,
            weekly_noise_abs: 2.0,
        }
    }
}
