//! Evaluation model: the owner's post-completion rating of a cleaner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Evaluation entity, keyed by (cleaning, cleaner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub cleaning_id: Uuid,
    pub cleaner_id: Uuid,
    pub no_show: bool,
    pub headline: Option<String>,
    pub comment: Option<String>,
    pub professionalism: Option<i32>,
    pub completeness: Option<i32>,
    pub efficiency: Option<i32>,
    pub overall_rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an evaluation; all ratings are on a 0 to 5 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvaluation {
    #[serde(default)]
    pub no_show: bool,
    pub headline: Option<String>,
    pub comment: Option<String>,
    pub professionalism: Option<i32>,
    pub completeness: Option<i32>,
    pub efficiency: Option<i32>,
    pub overall_rating: i32,
}

/// Aggregate rating statistics for a cleaner across all their evaluations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerStats {
    pub avg_professionalism: Option<f64>,
    pub avg_completeness: Option<f64>,
    pub avg_efficiency: Option<f64>,
    pub avg_overall_rating: Option<f64>,
    pub max_overall_rating: Option<i32>,
    pub min_overall_rating: Option<i32>,
    pub total_evaluations: i64,
    pub no_show_count: i64,
}
