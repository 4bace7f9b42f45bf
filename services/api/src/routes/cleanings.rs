//! Cleaning job handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{NewCleaning, UpdateCleaning, User},
    state::AppState,
    validation,
};

/// Post a new cleaning job owned by the authenticated user
pub async fn create_cleaning(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<NewCleaning>,
) -> ApiResult<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    validation::validate_price(payload.price).map_err(ApiError::Validation)?;

    let cleaning = state.cleanings.create(&payload, actor.id).await?;

    Ok((StatusCode::CREATED, Json(cleaning)))
}

/// List all cleaning jobs
pub async fn list_cleanings(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let cleanings = state.cleanings.list_all().await?;
    Ok(Json(cleanings))
}

/// Fetch a cleaning job by ID
pub async fn get_cleaning(
    State(state): State<AppState>,
    Path(cleaning_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let cleaning = state
        .cleanings
        .get_by_id(cleaning_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No cleaning job found with that id".to_string()))?;

    Ok(Json(cleaning))
}

/// Update a cleaning job; owner only
pub async fn update_cleaning(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(cleaning_id): Path<Uuid>,
    Json(payload): Json<UpdateCleaning>,
) -> ApiResult<impl IntoResponse> {
    let cleaning = state
        .cleanings
        .get_by_id(cleaning_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No cleaning job found with that id".to_string()))?;

    if cleaning.owner != actor.id {
        return Err(ApiError::Forbidden(
            "Users are unable to update cleaning jobs they do not own".to_string(),
        ));
    }

    if let Some(price) = payload.price {
        validation::validate_price(price).map_err(ApiError::Validation)?;
    }
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("Name must not be empty".to_string()));
        }
    }

    let updated = state.cleanings.update(&cleaning, &payload).await?;

    Ok(Json(updated))
}

/// Deleting cleaning jobs is not part of the current design; the endpoint
/// exists but always refuses.
pub async fn delete_cleaning(
    Path(_cleaning_id): Path<Uuid>,
) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": "Deleting cleaning jobs is disabled",
        })),
    )
}
