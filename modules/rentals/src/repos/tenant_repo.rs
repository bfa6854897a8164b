use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use thiserror::Error;
use uuid::Uuid;

/// Local projection of an identity-provider account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Tenant profile owned by a non-administrator user
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct Tenant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tenant row joined with its owning user, for back-office listings
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct TenantWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Errors that can occur during tenant repository operations
#[derive(Debug, Error)]
pub enum TenantError {
    #[error("Tenant not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, full_name, is_admin, is_active, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Find the active tenant profile owned by a user
pub async fn find_tenant_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as::<_, Tenant>(
        r#"
        SELECT id, user_id, phone, address, is_active, created_at, updated_at
        FROM tenants
        WHERE user_id = $1 AND is_active = TRUE
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_tenant(pool: &PgPool, tenant_id: Uuid) -> Result<Tenant, TenantError> {
    sqlx::query_as::<_, Tenant>(
        r#"
        SELECT id, user_id, phone, address, is_active, created_at, updated_at
        FROM tenants
        WHERE id = $1
        "#,
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?
    .ok_or(TenantError::NotFound(tenant_id))
}

pub async fn list_tenants(pool: &PgPool) -> Result<Vec<TenantWithUser>, sqlx::Error> {
    sqlx::query_as::<_, TenantWithUser>(
        r#"
        SELECT t.id, t.user_id, u.username, u.email, u.full_name,
               t.phone, t.address, t.is_active, t.created_at
        FROM tenants t
        JOIN users u ON u.id = t.user_id
        ORDER BY t.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Insert the identity row for a provisioned tenant account
///
/// Provisioned accounts are never administrators.
pub async fn insert_user(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    username: &str,
    email: &str,
    full_name: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, full_name, is_admin, is_active)
        VALUES ($1, $2, $3, $4, FALSE, TRUE)
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(full_name)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn insert_tenant(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    user_id: Uuid,
    phone: &str,
    address: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO tenants (id, user_id, phone, address, is_active)
        VALUES ($1, $2, $3, $4, TRUE)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(phone)
    .bind(address)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_tenant(
    pool: &PgPool,
    tenant_id: Uuid,
    phone: &str,
    address: &str,
) -> Result<(), TenantError> {
    let result = sqlx::query(
        r#"
        UPDATE tenants
        SET phone = $2, address = $3, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(tenant_id)
    .bind(phone)
    .bind(address)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(TenantError::NotFound(tenant_id));
    }
    Ok(())
}

/// Soft-delete: tenants are deactivated, never removed
pub async fn deactivate_tenant(pool: &PgPool, tenant_id: Uuid) -> Result<(), TenantError> {
    let result = sqlx::query(
        r#"
        UPDATE tenants
        SET is_active = FALSE, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(tenant_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(TenantError::NotFound(tenant_id));
    }
    Ok(())
}
