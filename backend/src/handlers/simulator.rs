//! HTTP handlers for what-if simulation endpoints

use axum::{extract::State, Json};
use shared::{WhatIfRequest, WhatIfResult};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Run a what-if scenario
pub async fn simulate(
    State(state): State<AppState>,
    Json(request): Json<WhatIfRequest>,
) -> AppResult<Json<WhatIfResult>> {
    request
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let result = state.scenario.evaluate(&request).await?;
    Ok(Json(result))
}
