use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// Rent agreement model, one per tenant
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct Agreement {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub monthly_rent_eur: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Errors that can occur during agreement repository operations
#[derive(Debug, Error)]
pub enum AgreementError {
    #[error("No active agreement for tenant {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Find a tenant's active agreement, if any
pub async fn find_active_by_tenant(
    pool: &PgPool,
    tenant_id: Uuid,
) -> Result<Option<Agreement>, sqlx::Error> {
    sqlx::query_as::<_, Agreement>(
        r#"
        SELECT id, tenant_id, monthly_rent_eur, start_date, end_date,
               is_active, created_at, updated_at
        FROM rent_agreements
        WHERE tenant_id = $1 AND is_active = TRUE
        "#,
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

/// Find a tenant's active agreement or fail with NotFound
pub async fn get_active_by_tenant(
    pool: &PgPool,
    tenant_id: Uuid,
) -> Result<Agreement, AgreementError> {
    find_active_by_tenant(pool, tenant_id)
        .await?
        .ok_or(AgreementError::NotFound(tenant_id))
}

/// Create or replace the tenant's single agreement
///
/// A tenant has at most one agreement row; re-provisioning updates it in
/// place via the unique tenant_id constraint.
pub async fn upsert(
    pool: &PgPool,
    tenant_id: Uuid,
    monthly_rent_eur: Decimal,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    is_active: bool,
) -> Result<Agreement, sqlx::Error> {
    sqlx::query_as::<_, Agreement>(
        r#"
        INSERT INTO rent_agreements
            (id, tenant_id, monthly_rent_eur, start_date, end_date, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (tenant_id) DO UPDATE
        SET monthly_rent_eur = EXCLUDED.monthly_rent_eur,
            start_date = EXCLUDED.start_date,
            end_date = EXCLUDED.end_date,
            is_active = EXCLUDED.is_active,
            updated_at = now()
        RETURNING id, tenant_id, monthly_rent_eur, start_date, end_date,
                  is_active, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(monthly_rent_eur)
    .bind(start_date)
    .bind(end_date)
    .bind(is_active)
    .fetch_one(pool)
    .await
}
