//! Back-office tenant provisioning and rent agreements

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::is_unique_violation;
use crate::repos::agreement_repo::{self, Agreement};
use crate::repos::tenant_repo::{self, Tenant, TenantWithUser};
use crate::routes::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProvisionTenantRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Handler for POST /api/admin/tenants
///
/// Provisions the identity row and the tenant profile together. The
/// provisioned account is never an administrator.
pub async fn provision_tenant(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<ProvisionTenantRequest>,
) -> Result<(StatusCode, Json<Tenant>), ApiError> {
    if req.username.trim().is_empty() || !req.email.contains('@') {
        return Err(ApiError::bad_request("username and a valid email are required"));
    }

    let user_id = Uuid::new_v4();
    let tenant_id = Uuid::new_v4();

    let mut tx = state.db.begin().await?;
    tenant_repo::insert_user(&mut tx, user_id, req.username.trim(), req.email.trim(), &req.full_name)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("username or email already in use")
            } else {
                e.into()
            }
        })?;
    tenant_repo::insert_tenant(&mut tx, tenant_id, user_id, &req.phone, &req.address).await?;
    tx.commit().await?;

    tracing::info!(tenant_id = %tenant_id, user_id = %user_id, "tenant provisioned");

    let tenant = tenant_repo::find_tenant(&state.db, tenant_id).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

/// Handler for GET /api/admin/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<Vec<TenantWithUser>>, ApiError> {
    Ok(Json(tenant_repo::list_tenants(&state.db).await?))
}

/// Handler for GET /api/admin/tenants/{tenant_id}
pub async fn get_tenant(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<Tenant>, ApiError> {
    Ok(Json(tenant_repo::find_tenant(&state.db, tenant_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTenantRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Handler for PUT /api/admin/tenants/{tenant_id}
pub async fn update_tenant(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(tenant_id): Path<Uuid>,
    Json(req): Json<UpdateTenantRequest>,
) -> Result<Json<Tenant>, ApiError> {
    tenant_repo::update_tenant(&state.db, tenant_id, &req.phone, &req.address).await?;
    Ok(Json(tenant_repo::find_tenant(&state.db, tenant_id).await?))
}

/// Handler for POST /api/admin/tenants/{tenant_id}/deactivate
///
/// Tenants are soft-deleted; their history stays queryable.
pub async fn deactivate_tenant(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<Tenant>, ApiError> {
    tenant_repo::deactivate_tenant(&state.db, tenant_id).await?;
    tracing::info!(tenant_id = %tenant_id, "tenant deactivated");
    Ok(Json(tenant_repo::find_tenant(&state.db, tenant_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpsertAgreementRequest {
    pub monthly_rent_eur: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Handler for POST /api/admin/tenants/{tenant_id}/agreement
///
/// A tenant has one agreement; posting again replaces its terms.
pub async fn upsert_agreement(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(tenant_id): Path<Uuid>,
    Json(req): Json<UpsertAgreementRequest>,
) -> Result<Json<Agreement>, ApiError> {
    if req.monthly_rent_eur < Decimal::ZERO {
        return Err(ApiError::bad_request("monthly rent must not be negative"));
    }
    if let Some(end) = req.end_date {
        if end < req.start_date {
            return Err(ApiError::bad_request("end date must not precede start date"));
        }
    }

    // Ensure the tenant exists before attaching terms to it
    tenant_repo::find_tenant(&state.db, tenant_id).await?;

    let agreement = agreement_repo::upsert(
        &state.db,
        tenant_id,
        req.monthly_rent_eur,
        req.start_date,
        req.end_date,
        req.is_active,
    )
    .await?;

    Ok(Json(agreement))
}

/// Handler for GET /api/admin/tenants/{tenant_id}/agreement
pub async fn get_agreement(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<Agreement>, ApiError> {
    Ok(Json(
        agreement_repo::get_active_by_tenant(&state.db, tenant_id).await?,
    ))
}
