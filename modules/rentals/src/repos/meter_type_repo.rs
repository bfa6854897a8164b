use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// Catalog entity: a metered service and its recurring reading window
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct MeterType {
    pub id: Uuid,
    pub name: String,
    /// Display unit (kWh, m³, ...)
    pub unit: String,
    pub reading_day_start: i32,
    pub reading_day_end: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Errors that can occur during meter-type repository operations
#[derive(Debug, Error)]
pub enum MeterTypeError {
    #[error("Meter type not found: {0}")]
    NotFound(Uuid),

    #[error("Meter type name already exists: {0}")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const METER_TYPE_COLUMNS: &str =
    "id, name, unit, reading_day_start, reading_day_end, is_active, created_at, updated_at";

pub async fn list(pool: &PgPool) -> Result<Vec<MeterType>, sqlx::Error> {
    let sql = format!("SELECT {METER_TYPE_COLUMNS} FROM meter_types ORDER BY name");
    sqlx::query_as::<_, MeterType>(&sql).fetch_all(pool).await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<MeterType>, sqlx::Error> {
    let sql = format!(
        "SELECT {METER_TYPE_COLUMNS} FROM meter_types WHERE is_active = TRUE ORDER BY name"
    );
    sqlx::query_as::<_, MeterType>(&sql).fetch_all(pool).await
}

/// Find a meter type only if it exists and is active
pub async fn find_active(pool: &PgPool, id: Uuid) -> Result<Option<MeterType>, sqlx::Error> {
    let sql = format!(
        "SELECT {METER_TYPE_COLUMNS} FROM meter_types WHERE id = $1 AND is_active = TRUE"
    );
    sqlx::query_as::<_, MeterType>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &PgPool,
    name: &str,
    unit: &str,
    reading_day_start: i32,
    reading_day_end: i32,
) -> Result<MeterType, MeterTypeError> {
    let sql = format!(
        "INSERT INTO meter_types (id, name, unit, reading_day_start, reading_day_end, is_active)
         VALUES ($1, $2, $3, $4, $5, TRUE)
         RETURNING {METER_TYPE_COLUMNS}"
    );
    sqlx::query_as::<_, MeterType>(&sql)
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(unit)
        .bind(reading_day_start)
        .bind(reading_day_end)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if crate::db::is_unique_violation(&e) {
                MeterTypeError::DuplicateName(name.to_string())
            } else {
                MeterTypeError::Database(e)
            }
        })
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    unit: &str,
    reading_day_start: i32,
    reading_day_end: i32,
    is_active: bool,
) -> Result<MeterType, MeterTypeError> {
    let sql = format!(
        "UPDATE meter_types
         SET unit = $2, reading_day_start = $3, reading_day_end = $4,
             is_active = $5, updated_at = now()
         WHERE id = $1
         RETURNING {METER_TYPE_COLUMNS}"
    );
    sqlx::query_as::<_, MeterType>(&sql)
        .bind(id)
        .bind(unit)
        .bind(reading_day_start)
        .bind(reading_day_end)
        .bind(is_active)
        .fetch_optional(pool)
        .await?
        .ok_or(MeterTypeError::NotFound(id))
}

/// Create-if-absent by unique name; returns true when a row was created
pub async fn ensure(
    pool: &PgPool,
    name: &str,
    unit: &str,
    reading_day_start: i32,
    reading_day_end: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO meter_types (id, name, unit, reading_day_start, reading_day_end, is_active)
        VALUES ($1, $2, $3, $4, $5, TRUE)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(unit)
    .bind(reading_day_start)
    .bind(reading_day_end)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
