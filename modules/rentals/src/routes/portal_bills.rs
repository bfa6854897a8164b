//! Utility bills for the tenant portal: status buckets and downloads

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::repos::bill_repo::{self, Bill};
use crate::routes::ApiError;
use crate::services::billing_projection;
use crate::session::TenantSession;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BillsResponse {
    pub unpaid: Vec<Bill>,
    pub overdue: Vec<Bill>,
    /// Most recent paid bills only
    pub paid: Vec<Bill>,
}

/// Handler for GET /api/portal/bills
pub async fn get_bills(
    State(state): State<AppState>,
    session: TenantSession,
) -> Result<Json<BillsResponse>, ApiError> {
    let bills = bill_repo::list_by_tenant(&state.db, session.tenant.id).await?;
    let buckets = billing_projection::project_bills(bills);

    Ok(Json(BillsResponse {
        unpaid: buckets.unpaid,
        overdue: buckets.overdue,
        paid: buckets.paid,
    }))
}

/// Handler for GET /api/portal/bills/{bill_id}/download
///
/// Streams the attachment from the blob store. A missing attachment or a
/// blob-store failure is a user-visible message, not a hard failure.
pub async fn download_bill(
    State(state): State<AppState>,
    session: TenantSession,
    Path(bill_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let bill = bill_repo::find_for_tenant(&state.db, bill_id, session.tenant.id).await?;

    let blob_key = bill
        .blob_key
        .as_deref()
        .ok_or_else(|| ApiError::not_found("No file attached to this bill"))?;

    let bytes = state.blobs.get(blob_key).await.map_err(|e| {
        tracing::warn!(bill_id = %bill.id, error = %e, "bill attachment unavailable");
        ApiError::not_found("Bill file is currently unavailable")
    })?;

    let disposition = format!("attachment; filename=\"{}\"", bill.download_filename());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
