use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// Catalog entity: a kind of utility (electricity, gas, water, ...)
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct UtilityType {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Errors that can occur during utility-type repository operations
#[derive(Debug, Error)]
pub enum UtilityTypeError {
    #[error("Utility type not found: {0}")]
    NotFound(Uuid),

    #[error("Utility type name already exists: {0}")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn list(pool: &PgPool) -> Result<Vec<UtilityType>, sqlx::Error> {
    sqlx::query_as::<_, UtilityType>(
        r#"
        SELECT id, name, description, is_active, created_at, updated_at
        FROM utility_types
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    name: &str,
    description: &str,
) -> Result<UtilityType, UtilityTypeError> {
    sqlx::query_as::<_, UtilityType>(
        r#"
        INSERT INTO utility_types (id, name, description, is_active)
        VALUES ($1, $2, $3, TRUE)
        RETURNING id, name, description, is_active, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if crate::db::is_unique_violation(&e) {
            UtilityTypeError::DuplicateName(name.to_string())
        } else {
            UtilityTypeError::Database(e)
        }
    })
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    description: &str,
    is_active: bool,
) -> Result<UtilityType, UtilityTypeError> {
    sqlx::query_as::<_, UtilityType>(
        r#"
        UPDATE utility_types
        SET description = $2, is_active = $3, updated_at = now()
        WHERE id = $1
        RETURNING id, name, description, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(description)
    .bind(is_active)
    .fetch_optional(pool)
    .await?
    .ok_or(UtilityTypeError::NotFound(id))
}

/// Create-if-absent by unique name; returns true when a row was created
pub async fn ensure(
    pool: &PgPool,
    name: &str,
    description: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO utility_types (id, name, description, is_active)
        VALUES ($1, $2, $3, TRUE)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
