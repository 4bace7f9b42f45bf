//! Marketplace API service
//!
//! Connects cleaning-job owners with cleaners who submit offers. The core
//! of the service is the offer lifecycle (pending -> accepted/rejected ->
//! completed), the accept-one-reject-rest rule, and the authorization
//! guards gating each transition; everything around it is conventional
//! axum + sqlx plumbing.

pub mod error;
pub mod guards;
pub mod jwt;
pub mod lifecycle;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;
