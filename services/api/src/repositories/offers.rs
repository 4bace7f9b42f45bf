//! Offers repository: persistence side of the offer lifecycle
//!
//! Creation, listing, and lookup are plain queries. Acceptance is the one
//! delicate operation: inside a single transaction it row-locks every offer
//! for the job, re-validates with [`plan_acceptance`](crate::lifecycle::plan_acceptance)
//! against the locked state, rejects the losers, and promotes the target.
//! A racing acceptance blocks on the row locks and then fails the
//! re-validation with Conflict, leaving state untouched.

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::lifecycle::plan_acceptance;
use crate::models::{Offer, OfferStatus};

fn offer_from_row(row: &PgRow) -> ApiResult<Offer> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<OfferStatus>()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(Offer {
        cleaning_id: row.try_get("cleaning_id")?,
        user_id: row.try_get("user_id")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const OFFER_COLUMNS: &str = "cleaning_id, user_id, status, created_at, updated_at";

/// Offers repository
#[derive(Clone)]
pub struct OffersRepository {
    pool: PgPool,
}

impl OffersRepository {
    /// Create a new offers repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending offer from a user on a cleaning job. A duplicate
    /// (cleaning, user) pair trips the composite primary key and surfaces
    /// as Conflict.
    pub async fn create_for_cleaning(&self, cleaning_id: Uuid, user_id: Uuid) -> ApiResult<Offer> {
        info!("User {} offering on cleaning {}", user_id, cleaning_id);

        let row = sqlx::query(&format!(
            "INSERT INTO user_offers_for_cleanings (cleaning_id, user_id, status) \
             VALUES ($1, $2, 'pending') \
             RETURNING {OFFER_COLUMNS}"
        ))
        .bind(cleaning_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict(
                "Users are unable to create more than one offer for a cleaning job".to_string(),
            ),
            other => other,
        })?;

        offer_from_row(&row)
    }

    /// List all offers for a cleaning job, oldest first
    pub async fn list_for_cleaning(&self, cleaning_id: Uuid) -> ApiResult<Vec<Offer>> {
        let rows = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM user_offers_for_cleanings \
             WHERE cleaning_id = $1 ORDER BY created_at"
        ))
        .bind(cleaning_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(offer_from_row).collect()
    }

    /// Fetch the offer a user made on a cleaning job, if any
    pub async fn get_for_cleaning_from_user(
        &self,
        cleaning_id: Uuid,
        user_id: Uuid,
    ) -> ApiResult<Option<Offer>> {
        let row = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM user_offers_for_cleanings \
             WHERE cleaning_id = $1 AND user_id = $2"
        ))
        .bind(cleaning_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(offer_from_row).transpose()
    }

    /// Accept the target user's offer and reject every competing pending
    /// offer, as one atomic unit. Fails with Conflict, mutating nothing,
    /// when the job already has an accepted offer or the target offer is
    /// not pending.
    pub async fn accept(&self, cleaning_id: Uuid, target_user: Uuid) -> ApiResult<Offer> {
        info!(
            "Accepting offer from user {} on cleaning {}",
            target_user, cleaning_id
        );

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;

        // Lock every offer for this job so racing acceptances serialize
        // here, then re-validate against the locked state.
        let rows = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM user_offers_for_cleanings \
             WHERE cleaning_id = $1 ORDER BY created_at FOR UPDATE"
        ))
        .bind(cleaning_id)
        .fetch_all(&mut *tx)
        .await?;

        let offers: Vec<Offer> = rows.iter().map(offer_from_row).collect::<ApiResult<_>>()?;
        let plan = plan_acceptance(&offers, target_user)?;

        if !plan.reject_users.is_empty() {
            sqlx::query(
                "UPDATE user_offers_for_cleanings \
                 SET status = 'rejected', updated_at = now() \
                 WHERE cleaning_id = $1 AND user_id <> $2 AND status = 'pending'",
            )
            .bind(cleaning_id)
            .bind(target_user)
            .execute(&mut *tx)
            .await?;
        }

        let row = sqlx::query(&format!(
            "UPDATE user_offers_for_cleanings \
             SET status = 'accepted', updated_at = now() \
             WHERE cleaning_id = $1 AND user_id = $2 AND status = 'pending' \
             RETURNING {OFFER_COLUMNS}"
        ))
        .bind(cleaning_id)
        .bind(plan.accept_user)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::Conflict("Only pending offers can be accepted".to_string()))?;

        let accepted = offer_from_row(&row)?;
        tx.commit().await.map_err(ApiError::from)?;

        Ok(accepted)
    }
}
