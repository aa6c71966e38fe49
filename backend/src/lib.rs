//! AgriTwin advisory backend
//!
//! Library crate backing the `agritwin-server` binary; exposed as a library
//! so integration tests can exercise the services directly.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
use error::AppResult;
use external::{GeocodeClient, MandiClient, PowerClient, SoilGridsClient};
use services::{
    ForecastService, IrrigationService, MarketService, ProfileStore, ScenarioService, SoilService,
    WeatherService, YieldPredictor,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub profiles: Arc<ProfileStore>,
    pub weather: Arc<WeatherService>,
    pub soil: Arc<SoilService>,
    pub market: Arc<MarketService>,
    pub irrigation: Arc<IrrigationService>,
    pub forecast: Arc<ForecastService>,
    pub scenario: Arc<ScenarioService>,
}

impl AppState {
    /// Wire up every service from configuration. Loads the yield model
    /// exactly once; failure aborts startup.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let predictor =
            YieldPredictor::from_artifact(std::path::Path::new(&config.model.artifact_path))?;

        let geocode = GeocodeClient::new(
            config.weather.geocode_url.clone(),
            config.weather.user_agent.clone(),
        );
        let weather = Arc::new(WeatherService::new(
            PowerClient::new(config.weather.base_url.clone()),
            geocode.clone(),
            &config.data.cache_dir,
            config.weather.history_days,
        ));
        let soil = Arc::new(SoilService::new(
            SoilGridsClient::new(config.soil.base_url.clone()),
            geocode.clone(),
            &config.data.cache_dir,
            config.soil.max_search_km,
            config.soil.search_step_km,
        ));
        let market = Arc::new(MarketService::new(
            MandiClient::new(config.market.base_url.clone()),
            geocode,
        ));
        let irrigation = Arc::new(IrrigationService::new(Arc::clone(&weather)));
        let profiles = Arc::new(ProfileStore::open(&config.data.profiles_path)?);

        let forecast = Arc::new(ForecastService::new(
            predictor.clone(),
            config.risk.clone(),
            config.simulator.monthly_noise_pct,
        ));
        let scenario = Arc::new(ScenarioService::new(
            predictor,
            Arc::clone(&profiles),
            Arc::clone(&weather),
            Arc::clone(&soil),
            Arc::clone(&market),
            Arc::clone(&irrigation),
            config.simulator.weeks,
            config.simulator.weekly_noise_abs,
        ));

        Ok(Self {
            config: Arc::new(config),
            profiles,
            weather,
            soil,
            market,
            irrigation,
            forecast,
            scenario,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgriTwin Advisory Platform API v1.0"
}
