//! HTTP handlers for profile management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::FarmerProfile;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::profile::{CreateProfileInput, UpdateProfileInput};
use crate::AppState;

/// List all profiles
pub async fn list_profiles(State(state): State<AppState>) -> AppResult<Json<Vec<FarmerProfile>>> {
    Ok(Json(state.profiles.list()))
}

/// Create a profile
pub async fn create_profile(
    State(state): State<AppState>,
    Json(input): Json<CreateProfileInput>,
) -> AppResult<Json<FarmerProfile>> {
    let profile = state.profiles.create(input)?;
    Ok(Json(profile))
}

/// Get a profile by id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<FarmerProfile>> {
    Ok(Json(state.profiles.get(profile_id)?))
}

/// Update a profile
pub async fn update_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<Json<FarmerProfile>> {
    let profile = state.profiles.update(profile_id, input)?;
    Ok(Json(profile))
}

/// Make a profile the active one
pub async fn activate_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<FarmerProfile>> {
    let profile = state.profiles.activate(profile_id)?;
    Ok(Json(profile))
}

/// The currently active profile
pub async fn get_active_profile(
    State(state): State<AppState>,
) -> AppResult<Json<FarmerProfile>> {
    state
        .profiles
        .active()
        .map(Json)
        .ok_or(AppError::NoActiveProfile)
}
