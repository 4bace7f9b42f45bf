//! Data models for the marketplace service

pub mod cleaning;
pub mod evaluation;
pub mod offer;
pub mod user;

pub use cleaning::{Cleaning, CleaningType, NewCleaning, UpdateCleaning};
pub use evaluation::{CleanerStats, Evaluation, NewEvaluation};
pub use offer::{Offer, OfferStatus};
pub use user::{LoginCredentials, NewUser, TokenResponse, User, UserResponse};
