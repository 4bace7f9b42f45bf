//! Evaluations repository: recording ratings and finalizing offers
//!
//! Creating an evaluation and moving the evaluated offer to `completed` is
//! one transaction: an evaluation must never exist for a non-completed
//! offer, and an offer must never be completed without its evaluation. The
//! offer row is locked and its status re-checked inside the transaction, so
//! a second evaluation for the same pair fails with Conflict (the offer is
//! no longer accepted).

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{CleanerStats, Evaluation, NewEvaluation, OfferStatus};

fn evaluation_from_row(row: &PgRow) -> Result<Evaluation, sqlx::Error> {
    Ok(Evaluation {
        cleaning_id: row.try_get("cleaning_id")?,
        cleaner_id: row.try_get("cleaner_id")?,
        no_show: row.try_get("no_show")?,
        headline: row.try_get("headline")?,
        comment: row.try_get("comment")?,
        professionalism: row.try_get("professionalism")?,
        completeness: row.try_get("completeness")?,
        efficiency: row.try_get("efficiency")?,
        overall_rating: row.try_get("overall_rating")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const EVALUATION_COLUMNS: &str = "cleaning_id, cleaner_id, no_show, headline, comment, \
                                  professionalism, completeness, efficiency, overall_rating, \
                                  created_at, updated_at";

/// Evaluations repository
#[derive(Clone)]
pub struct EvaluationsRepository {
    pool: PgPool,
}

impl EvaluationsRepository {
    /// Create a new evaluations repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record the owner's evaluation of a cleaner and mark the cleaner's
    /// offer completed, atomically.
    pub async fn create_for_cleaner(
        &self,
        cleaning_id: Uuid,
        cleaner_id: Uuid,
        new_evaluation: &NewEvaluation,
    ) -> ApiResult<Evaluation> {
        info!(
            "Evaluating cleaner {} on cleaning {}",
            cleaner_id, cleaning_id
        );

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;

        // Lock the offer and re-check its state inside the transaction; the
        // guard already ran against pre-fetched entities, but a racing
        // evaluation could have completed the offer since.
        let status: Option<String> = sqlx::query_scalar(
            "SELECT status FROM user_offers_for_cleanings \
             WHERE cleaning_id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(cleaning_id)
        .bind(cleaner_id)
        .fetch_optional(&mut *tx)
        .await?;

        let status = status
            .ok_or_else(|| {
                ApiError::NotFound("No offer from this user for this cleaning job".to_string())
            })?
            .parse::<OfferStatus>()
            .map_err(|e| anyhow::anyhow!(e))?;

        if status != OfferStatus::Accepted {
            return Err(ApiError::Conflict(
                "Evaluations can only be created while an offer is accepted".to_string(),
            ));
        }

        let row = sqlx::query(&format!(
            "INSERT INTO cleaning_to_cleaner_evaluations ( \
                 cleaning_id, cleaner_id, no_show, headline, comment, \
                 professionalism, completeness, efficiency, overall_rating \
             ) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {EVALUATION_COLUMNS}"
        ))
        .bind(cleaning_id)
        .bind(cleaner_id)
        .bind(new_evaluation.no_show)
        .bind(&new_evaluation.headline)
        .bind(&new_evaluation.comment)
        .bind(new_evaluation.professionalism)
        .bind(new_evaluation.completeness)
        .bind(new_evaluation.efficiency)
        .bind(new_evaluation.overall_rating)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => {
                ApiError::Conflict("This cleaner has already been evaluated for this cleaning job".to_string())
            }
            other => other,
        })?;

        let evaluation = evaluation_from_row(&row).map_err(ApiError::from)?;

        sqlx::query(
            "UPDATE user_offers_for_cleanings \
             SET status = 'completed', updated_at = now() \
             WHERE cleaning_id = $1 AND user_id = $2",
        )
        .bind(cleaning_id)
        .bind(cleaner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(ApiError::from)?;

        Ok(evaluation)
    }

    /// List all evaluations a cleaner has received, newest first
    pub async fn list_for_cleaner(&self, cleaner_id: Uuid) -> ApiResult<Vec<Evaluation>> {
        let rows = sqlx::query(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM cleaning_to_cleaner_evaluations \
             WHERE cleaner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(cleaner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| evaluation_from_row(row).map_err(ApiError::from))
            .collect()
    }

    /// Fetch the evaluation a cleaner received for one cleaning job, if any
    pub async fn get_for_cleaner(
        &self,
        cleaning_id: Uuid,
        cleaner_id: Uuid,
    ) -> ApiResult<Option<Evaluation>> {
        let row = sqlx::query(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM cleaning_to_cleaner_evaluations \
             WHERE cleaning_id = $1 AND cleaner_id = $2"
        ))
        .bind(cleaning_id)
        .bind(cleaner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| evaluation_from_row(&row).map_err(ApiError::from))
            .transpose()
    }

    /// Aggregate rating statistics for a cleaner
    pub async fn stats_for_cleaner(&self, cleaner_id: Uuid) -> ApiResult<CleanerStats> {
        let row = sqlx::query(
            "SELECT \
                 AVG(professionalism)::float8 AS avg_professionalism, \
                 AVG(completeness)::float8 AS avg_completeness, \
                 AVG(efficiency)::float8 AS avg_efficiency, \
                 AVG(overall_rating)::float8 AS avg_overall_rating, \
                 MAX(overall_rating) AS max_overall_rating, \
                 MIN(overall_rating) AS min_overall_rating, \
                 COUNT(*) AS total_evaluations, \
                 COUNT(*) FILTER (WHERE no_show) AS no_show_count \
             FROM cleaning_to_cleaner_evaluations \
             WHERE cleaner_id = $1",
        )
        .bind(cleaner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(CleanerStats {
            avg_professionalism: row.try_get("avg_professionalism")?,
            avg_completeness: row.try_get("avg_completeness")?,
            avg_efficiency: row.try_get("avg_efficiency")?,
            avg_overall_rating: row.try_get("avg_overall_rating")?,
            max_overall_rating: row.try_get("max_overall_rating")?,
            min_overall_rating: row.try_get("min_overall_rating")?,
            total_evaluations: row.try_get("total_evaluations")?,
            no_show_count: row.try_get("no_show_count")?,
        })
    }
}
