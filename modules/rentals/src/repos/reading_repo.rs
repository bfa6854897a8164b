use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// Tenant-submitted meter reading
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct Reading {
    pub id: Uuid,
    pub meter_type_id: Uuid,
    pub tenant_id: Uuid,
    pub reading_value: Decimal,
    pub reading_date: NaiveDate,
    pub notes: String,
    pub is_processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Errors that can occur during reading repository operations
#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("Reading not found: {0}")]
    NotFound(Uuid),

    /// The (meter_type, tenant, reading_date) triple already exists
    #[error("Reading already submitted for this meter type and date")]
    Duplicate,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const READING_COLUMNS: &str = "id, meter_type_id, tenant_id, reading_value, reading_date, \
     notes, is_processed, created_at, updated_at";

/// Whether a reading exists for the (meter_type, tenant, date) triple
pub async fn exists_for(
    pool: &PgPool,
    meter_type_id: Uuid,
    tenant_id: Uuid,
    reading_date: NaiveDate,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM meter_readings
            WHERE meter_type_id = $1 AND tenant_id = $2 AND reading_date = $3
        )
        "#,
    )
    .bind(meter_type_id)
    .bind(tenant_id)
    .bind(reading_date)
    .fetch_one(pool)
    .await
}

/// Insert a new unprocessed reading
///
/// The unique constraint on the triple is the authoritative duplicate
/// guard; a violation maps to `ReadingError::Duplicate` so concurrent
/// identical submissions surface the same outcome as the pre-check.
pub async fn insert(
    pool: &PgPool,
    meter_type_id: Uuid,
    tenant_id: Uuid,
    reading_value: Decimal,
    reading_date: NaiveDate,
    notes: &str,
) -> Result<Reading, ReadingError> {
    let sql = format!(
        "INSERT INTO meter_readings
             (id, meter_type_id, tenant_id, reading_value, reading_date, notes, is_processed)
         VALUES ($1, $2, $3, $4, $5, $6, FALSE)
         RETURNING {READING_COLUMNS}"
    );
    sqlx::query_as::<_, Reading>(&sql)
        .bind(Uuid::new_v4())
        .bind(meter_type_id)
        .bind(tenant_id)
        .bind(reading_value)
        .bind(reading_date)
        .bind(notes)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if crate::db::is_unique_violation(&e) {
                ReadingError::Duplicate
            } else {
                ReadingError::Database(e)
            }
        })
}

/// A tenant's most recent reading for one meter type
pub async fn latest_for(
    pool: &PgPool,
    tenant_id: Uuid,
    meter_type_id: Uuid,
) -> Result<Option<Reading>, sqlx::Error> {
    let sql = format!(
        "SELECT {READING_COLUMNS} FROM meter_readings
         WHERE tenant_id = $1 AND meter_type_id = $2
         ORDER BY reading_date DESC
         LIMIT 1"
    );
    sqlx::query_as::<_, Reading>(&sql)
        .bind(tenant_id)
        .bind(meter_type_id)
        .fetch_optional(pool)
        .await
}

/// A tenant's most recent readings across all meters
pub async fn list_recent_by_tenant(
    pool: &PgPool,
    tenant_id: Uuid,
    limit: i64,
) -> Result<Vec<Reading>, sqlx::Error> {
    let sql = format!(
        "SELECT {READING_COLUMNS} FROM meter_readings
         WHERE tenant_id = $1
         ORDER BY reading_date DESC
         LIMIT $2"
    );
    sqlx::query_as::<_, Reading>(&sql)
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Back-office listing, optionally filtered by processed state
pub async fn list(
    pool: &PgPool,
    processed: Option<bool>,
) -> Result<Vec<Reading>, sqlx::Error> {
    let sql = format!(
        "SELECT {READING_COLUMNS} FROM meter_readings
         WHERE ($1::boolean IS NULL OR is_processed = $1)
         ORDER BY reading_date DESC"
    );
    sqlx::query_as::<_, Reading>(&sql)
        .bind(processed)
        .fetch_all(pool)
        .await
}

/// created -> processed; terminal once processed
pub async fn mark_processed(pool: &PgPool, reading_id: Uuid) -> Result<Reading, ReadingError> {
    let sql = format!(
        "UPDATE meter_readings
         SET is_processed = TRUE, updated_at = now()
         WHERE id = $1
         RETURNING {READING_COLUMNS}"
    );
    sqlx::query_as::<_, Reading>(&sql)
        .bind(reading_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ReadingError::NotFound(reading_id))
}
