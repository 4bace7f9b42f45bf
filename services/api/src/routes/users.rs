//! User registration, login, and identity handlers

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{LoginCredentials, NewUser, TokenResponse, User, UserResponse},
    state::AppState,
    validation,
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_username(&payload.username).map_err(ApiError::Validation)?;
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    let user = state.users.create(&payload).await?;
    info!("Registered user {}", user.username);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log in with username or email plus password, returning an access token
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginCredentials>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .users
        .find_by_username_or_email(&credentials.username_or_email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !user.is_active || !state.users.verify_password(&user, &credentials.password)? {
        return Err(ApiError::Unauthorized);
    }

    let access_token = state.jwt.generate_access_token(&user)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Return the authenticated user
pub async fn me(Extension(actor): Extension<User>) -> ApiResult<impl IntoResponse> {
    Ok(Json(UserResponse::from(actor)))
}
