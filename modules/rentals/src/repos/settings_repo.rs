use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

/// Administrator-managed key/value setting
///
/// Read by external/scheduled jobs (exchange-rate polling, notification
/// lead time); in-scope request logic does not consult these rows.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

pub async fn list(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
    sqlx::query_as::<_, Setting>(
        r#"
        SELECT key, value, description, updated_at
        FROM system_settings
        ORDER BY key
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Upsert by unique key
pub async fn upsert(
    pool: &PgPool,
    key: &str,
    value: &str,
    description: &str,
) -> Result<Setting, sqlx::Error> {
    sqlx::query_as::<_, Setting>(
        r#"
        INSERT INTO system_settings (key, value, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (key) DO UPDATE
        SET value = EXCLUDED.value,
            description = EXCLUDED.description,
            updated_at = now()
        RETURNING key, value, description, updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(description)
    .fetch_one(pool)
    .await
}

/// Create-if-absent by unique key; returns true when a row was created
pub async fn ensure(
    pool: &PgPool,
    key: &str,
    value: &str,
    description: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO system_settings (key, value, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (key) DO NOTHING
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
