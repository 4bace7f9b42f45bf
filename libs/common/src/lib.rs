//! Common library for the Sparkle marketplace
//!
//! This crate provides shared infrastructure used by the marketplace
//! services: PostgreSQL connectivity and the shared database error type.

pub mod database;
pub mod error;
