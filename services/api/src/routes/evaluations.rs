//! Evaluation handlers: the owner's post-completion rating of a cleaner

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    guards,
    models::{NewEvaluation, User},
    state::AppState,
    validation,
};

fn validate_ratings(payload: &NewEvaluation) -> ApiResult<()> {
    validation::validate_rating("overall_rating", payload.overall_rating)
        .map_err(ApiError::Validation)?;

    for (name, rating) in [
        ("professionalism", payload.professionalism),
        ("completeness", payload.completeness),
        ("efficiency", payload.efficiency),
    ] {
        if let Some(rating) = rating {
            validation::validate_rating(name, rating).map_err(ApiError::Validation)?;
        }
    }

    Ok(())
}

/// Create an evaluation for a cleaner on a cleaning job, completing their
/// accepted offer
pub async fn create_evaluation(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path((username, cleaning_id)): Path<(String, Uuid)>,
    Json(payload): Json<NewEvaluation>,
) -> ApiResult<impl IntoResponse> {
    validate_ratings(&payload)?;

    let cleaning = state
        .cleanings
        .get_by_id(cleaning_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No cleaning job found with that id".to_string()))?;
    let cleaner = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user found with that username".to_string()))?;

    // Ownership before the offer lookup, so only the owner can tell a
    // missing offer from a state conflict.
    guards::check_evaluation_owner(&actor, &cleaning)?;

    let offer = state
        .offers
        .get_for_cleaning_from_user(cleaning.id, cleaner.id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("No offer from this user for this cleaning job".to_string())
        })?;

    guards::check_evaluation_create(&actor, &cleaning, &cleaner, &offer)?;

    let evaluation = state
        .evaluations
        .create_for_cleaner(cleaning.id, cleaner.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(evaluation)))
}

/// List all evaluations a cleaner has received
pub async fn list_evaluations(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let cleaner = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user found with that username".to_string()))?;

    let evaluations = state.evaluations.list_for_cleaner(cleaner.id).await?;

    Ok(Json(evaluations))
}

/// Aggregate rating statistics for a cleaner
pub async fn cleaner_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let cleaner = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user found with that username".to_string()))?;

    let stats = state.evaluations.stats_for_cleaner(cleaner.id).await?;

    Ok(Json(stats))
}

/// Fetch the evaluation a cleaner received for one cleaning job
pub async fn get_evaluation(
    State(state): State<AppState>,
    Path((username, cleaning_id)): Path<(String, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    let cleaner = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user found with that username".to_string()))?;

    let evaluation = state
        .evaluations
        .get_for_cleaner(cleaning_id, cleaner.id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("No evaluation for this cleaner on this cleaning job".to_string())
        })?;

    Ok(Json(evaluation))
}
