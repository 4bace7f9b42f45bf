//! Application state shared across handlers

use sqlx::PgPool;

use crate::jwt::JwtService;
use crate::repositories::{
    CleaningsRepository, EvaluationsRepository, OffersRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub users: UserRepository,
    pub cleanings: CleaningsRepository,
    pub offers: OffersRepository,
    pub evaluations: EvaluationsRepository,
    pub jwt: JwtService,
}

impl AppState {
    /// Build the application state from a connection pool and JWT service
    pub fn new(pool: PgPool, jwt: JwtService) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            cleanings: CleaningsRepository::new(pool.clone()),
            offers: OffersRepository::new(pool.clone()),
            evaluations: EvaluationsRepository::new(pool.clone()),
            db_pool: pool,
            jwt,
        }
    }
}
