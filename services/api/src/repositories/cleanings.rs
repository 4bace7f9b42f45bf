//! Cleaning job repository for database operations

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{Cleaning, CleaningType, NewCleaning, UpdateCleaning};

fn cleaning_from_row(row: &PgRow) -> ApiResult<Cleaning> {
    let cleaning_type: String = row.try_get("cleaning_type")?;
    let cleaning_type = cleaning_type
        .parse::<CleaningType>()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(Cleaning {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        cleaning_type,
        price: row.try_get("price")?,
        owner: row.try_get("owner")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const CLEANING_COLUMNS: &str =
    "id, name, description, cleaning_type, price, owner, created_at, updated_at";

/// Cleaning job repository
#[derive(Clone)]
pub struct CleaningsRepository {
    pool: PgPool,
}

impl CleaningsRepository {
    /// Create a new cleanings repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a cleaning job owned by the given user
    pub async fn create(&self, new_cleaning: &NewCleaning, owner: Uuid) -> ApiResult<Cleaning> {
        info!("Creating cleaning job '{}' for {}", new_cleaning.name, owner);

        let row = sqlx::query(&format!(
            "INSERT INTO cleanings (name, description, cleaning_type, price, owner) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {CLEANING_COLUMNS}"
        ))
        .bind(&new_cleaning.name)
        .bind(&new_cleaning.description)
        .bind(new_cleaning.cleaning_type.as_str())
        .bind(new_cleaning.price)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        cleaning_from_row(&row)
    }

    /// Fetch a cleaning job by ID
    pub async fn get_by_id(&self, id: Uuid) -> ApiResult<Option<Cleaning>> {
        let row = sqlx::query(&format!(
            "SELECT {CLEANING_COLUMNS} FROM cleanings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(cleaning_from_row).transpose()
    }

    /// List all cleaning jobs, newest first
    pub async fn list_all(&self) -> ApiResult<Vec<Cleaning>> {
        let rows = sqlx::query(&format!(
            "SELECT {CLEANING_COLUMNS} FROM cleanings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(cleaning_from_row).collect()
    }

    /// Update a cleaning job, leaving absent fields unchanged
    pub async fn update(&self, cleaning: &Cleaning, update: &UpdateCleaning) -> ApiResult<Cleaning> {
        let row = sqlx::query(&format!(
            "UPDATE cleanings \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 cleaning_type = COALESCE($4, cleaning_type), \
                 price = COALESCE($5, price), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {CLEANING_COLUMNS}"
        ))
        .bind(cleaning.id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.cleaning_type.map(|ct| ct.as_str()))
        .bind(update.price)
        .fetch_one(&self.pool)
        .await?;

        cleaning_from_row(&row)
    }
}
