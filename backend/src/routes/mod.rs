//! Route definitions for the AgriTwin advisory platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Profile management
        .nest("/profiles", profile_routes())
        // Forecast report
        .nest("/forecast", forecast_routes())
        // What-if simulation
        .nest("/simulator", simulator_routes())
        // Irrigation planning
        .nest("/irrigation", irrigation_routes())
        // Environmental data
        .nest("/weather", weather_routes())
        .nest("/soil", soil_routes())
        .nest("/market", market_routes())
}

/// Profile management routes
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route("/active", get(handlers::get_active_profile))
        .route(
            "/:profile_id",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/:profile_id/activate", post(handlers::activate_profile))
}

/// Forecast routes
fn forecast_routes() -> Router<AppState> {
    Router::new().route("/report", get(handlers::get_farm_report))
}

/// Simulation routes
fn simulator_routes() -> Router<AppState> {
    Router::new().route("/simulate", post(handlers::simulate))
}

/// Irrigation routes
fn irrigation_routes() -> Router<AppState> {
    Router::new().route("/plan", get(handlers::get_irrigation_plan))
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_weather_summary))
        .route("/weekly", get(handlers::get_weather_weekly))
}

/// Soil routes
fn soil_routes() -> Router<AppState> {
    Router::new().route("/summary", get(handlers::get_soil_summary))
}

/// Market routes
fn market_routes() -> Router<AppState> {
    Router::new().route("/price", get(handlers::get_market_price))
}
