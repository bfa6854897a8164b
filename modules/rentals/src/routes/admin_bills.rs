//! Back-office utility bill management

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::repos::bill_repo::{self, Bill, BillStatus};
use crate::repos::tenant_repo;
use crate::routes::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBillRequest {
    pub utility_type_id: Uuid,
    pub tenant_id: Uuid,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub bill_date: Option<NaiveDate>,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub notes: String,
}

/// Handler for POST /api/admin/bills
pub async fn create_bill(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<Bill>), ApiError> {
    if req.amount < Decimal::ZERO {
        return Err(ApiError::bad_request("amount must not be negative"));
    }

    tenant_repo::find_tenant(&state.db, req.tenant_id).await?;

    let bill_date = req.bill_date.unwrap_or_else(|| state.today());
    let bill = bill_repo::insert(
        &state.db,
        req.utility_type_id,
        req.tenant_id,
        req.amount,
        req.due_date,
        bill_date,
        &req.invoice_number,
        &req.notes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(bill)))
}

#[derive(Debug, Deserialize)]
pub struct BillListQuery {
    pub tenant_id: Uuid,
}

/// Handler for GET /api/admin/bills?tenant_id=
pub async fn list_bills(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(params): Query<BillListQuery>,
) -> Result<Json<Vec<Bill>>, ApiError> {
    Ok(Json(
        bill_repo::list_by_tenant(&state.db, params.tenant_id).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBillStatusRequest {
    pub status: BillStatus,
    /// Recorded when the status moves to paid
    pub paid_on: Option<NaiveDate>,
}

/// Handler for PUT /api/admin/bills/{bill_id}/status
///
/// Overdue is set here manually; no scheduled transition exists.
pub async fn update_bill_status(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(bill_id): Path<Uuid>,
    Json(req): Json<UpdateBillStatusRequest>,
) -> Result<Json<Bill>, ApiError> {
    let paid_on = match req.status {
        BillStatus::Paid => req.paid_on,
        _ => None,
    };

    let bill = bill_repo::update_status(&state.db, bill_id, req.status, paid_on).await?;

    tracing::info!(bill_id = %bill.id, status = ?bill.status, "bill status updated");
    Ok(Json(bill))
}

/// Handler for PUT /api/admin/bills/{bill_id}/attachment
///
/// Stores the raw request body in the blob store under a tenant-scoped
/// key and records the reference on the bill.
pub async fn upload_bill_attachment(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(bill_id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<Bill>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("attachment body is empty"));
    }

    // Resolve the owning tenant so the blob key is scoped to it
    let owner: Option<Uuid> =
        sqlx::query_scalar("SELECT tenant_id FROM utility_bills WHERE id = $1")
            .bind(bill_id)
            .fetch_optional(&state.db)
            .await?;
    let tenant_id = owner.ok_or_else(|| ApiError::not_found("bill not found"))?;

    let blob_key = blob_storage::tenant_scoped_key(tenant_id);
    state
        .blobs
        .put(&blob_key, body.to_vec())
        .await
        .map_err(|e| {
            tracing::error!(bill_id = %bill_id, error = %e, "attachment upload failed");
            ApiError::internal("failed to store attachment")
        })?;

    bill_repo::set_attachment(&state.db, bill_id, &blob_key).await?;

    let bill = bill_repo::find_for_tenant(&state.db, bill_id, tenant_id).await?;
    Ok(Json(bill))
}
