//! API routes for the marketplace service

pub mod cleanings;
pub mod evaluations;
pub mod offers;
pub mod users;

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

/// Create the router for the marketplace service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/users/me", get(users::me))
        .route("/api/cleanings", post(cleanings::create_cleaning))
        .route(
            "/api/cleanings/:cleaning_id",
            put(cleanings::update_cleaning).delete(cleanings::delete_cleaning),
        )
        .route(
            "/api/cleanings/:cleaning_id/offers",
            post(offers::create_offer).get(offers::list_offers),
        )
        .route(
            "/api/cleanings/:cleaning_id/offers/:username",
            get(offers::get_offer).put(offers::accept_offer),
        )
        .route(
            "/api/users/:username/evaluations/:cleaning_id",
            post(evaluations::create_evaluation),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/cleanings", get(cleanings::list_cleanings))
        .route("/api/cleanings/:cleaning_id", get(cleanings::get_cleaning))
        .route(
            "/api/users/:username/evaluations",
            get(evaluations::list_evaluations),
        )
        .route(
            "/api/users/:username/evaluations/stats",
            get(evaluations::cleaner_stats),
        )
        .route(
            "/api/users/:username/evaluations/:cleaning_id",
            get(evaluations::get_evaluation),
        )
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "service": "marketplace-api",
        "database": database_ok,
    }))
}
