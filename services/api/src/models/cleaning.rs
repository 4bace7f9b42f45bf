//! Cleaning job model and related payloads

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of cleaning job being posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningType {
    DustUp,
    SpotClean,
    FullClean,
}

impl CleaningType {
    /// Database text representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CleaningType::DustUp => "dust_up",
            CleaningType::SpotClean => "spot_clean",
            CleaningType::FullClean => "full_clean",
        }
    }
}

impl Default for CleaningType {
    fn default() -> Self {
        CleaningType::SpotClean
    }
}

impl fmt::Display for CleaningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleaningType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dust_up" => Ok(CleaningType::DustUp),
            "spot_clean" => Ok(CleaningType::SpotClean),
            "full_clean" => Ok(CleaningType::FullClean),
            other => Err(format!("unknown cleaning type: {other}")),
        }
    }
}

/// Cleaning job entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cleaning {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cleaning_type: CleaningType,
    pub price: Decimal,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for posting a new cleaning job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCleaning {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub cleaning_type: CleaningType,
    pub price: Decimal,
}

/// Payload for updating a cleaning job; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCleaning {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cleaning_type: Option<CleaningType>,
    pub price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaning_type_round_trips_through_db_text() {
        for ct in [
            CleaningType::DustUp,
            CleaningType::SpotClean,
            CleaningType::FullClean,
        ] {
            assert_eq!(ct.as_str().parse::<CleaningType>(), Ok(ct));
        }
    }

    #[test]
    fn unknown_cleaning_type_is_rejected() {
        assert!("deep_scrub".parse::<CleaningType>().is_err());
    }
}
