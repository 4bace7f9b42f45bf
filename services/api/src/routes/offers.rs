//! Offer handlers: create, list, view, accept
//!
//! Each handler fetches the entities the guards need, runs the guards in
//! catalogue order (ownership before state), and only then touches the
//! lifecycle operations. Not-found is only reachable once guards pass.

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
    models::{Cleaning, User},
    state::AppState,
};

async fn fetch_cleaning(state: &AppState, cleaning_id: Uuid) -> ApiResult<Cleaning> {
    state
        .cleanings
        .get_by_id(cleaning_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No cleaning job found with that id".to_string()))
}

async fn fetch_user(state: &AppState, username: &str) -> ApiResult<User> {
    state
        .users
        .find_by_username(username)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user found with that username".to_string()))
}

/// Create a pending offer from the authenticated user on a cleaning job
pub async fn create_offer(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(cleaning_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let cleaning = fetch_cleaning(&state, cleaning_id).await?;
    let existing = state
        .offers
        .get_for_cleaning_from_user(cleaning.id, actor.id)
        .await?;

    guards::check_offer_create(&actor, &cleaning, existing.as_ref())?;

    let offer = state.offers.create_for_cleaning(cleaning.id, actor.id).await?;

    Ok((StatusCode::CREATED, Json(offer)))
}

/// List all offers on a cleaning job; owner only
pub async fn list_offers(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(cleaning_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let cleaning = fetch_cleaning(&state, cleaning_id).await?;

    guards::check_offer_list(&actor, &cleaning)?;

    let offers = state.offers.list_for_cleaning(cleaning.id).await?;

    Ok(Json(offers))
}

/// View the offer a user made on a cleaning job; owner or offer holder only
pub async fn get_offer(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path((cleaning_id, username)): Path<(Uuid, String)>,
) -> ApiResult<impl IntoResponse> {
    let cleaning = fetch_cleaning(&state, cleaning_id).await?;
    let offer_user = fetch_user(&state, &username).await?;

    guards::check_offer_view(&actor, &cleaning, offer_user.id)?;

    let offer = state
        .offers
        .get_for_cleaning_from_user(cleaning.id, offer_user.id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("No offer from this user for this cleaning job".to_string())
        })?;

    Ok(Json(offer))
}

/// Accept a user's offer, rejecting all competitors atomically; owner only
pub async fn accept_offer(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path((cleaning_id, username)): Path<(Uuid, String)>,
) -> ApiResult<impl IntoResponse> {
    let cleaning = fetch_cleaning(&state, cleaning_id).await?;

    // Ownership first: a non-owner must never learn whether an offer has
    // already been accepted.
    guards::check_offer_accept(&actor, &cleaning)?;

    let target = fetch_user(&state, &username).await?;
    state
        .offers
        .get_for_cleaning_from_user(cleaning.id, target.id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("No offer from this user for this cleaning job".to_string())
        })?;

    let accepted = state.offers.accept(cleaning.id, target.id).await?;

    Ok(Json(accepted))
}
