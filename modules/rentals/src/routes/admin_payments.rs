//! Back-office rent payment records

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::repos::agreement_repo;
use crate::repos::payment_repo::{self, Payment, PaymentStatus};
use crate::routes::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub tenant_id: Uuid,
    pub amount_eur: Decimal,
    /// Stored as entered; not validated against amount_eur * exchange_rate
    pub amount_ron: Decimal,
    pub exchange_rate: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

/// Handler for POST /api/admin/payments
pub async fn create_payment(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    if req.amount_eur < Decimal::ZERO
        || req.amount_ron < Decimal::ZERO
        || req.exchange_rate < Decimal::ZERO
    {
        return Err(ApiError::bad_request("amounts must not be negative"));
    }

    let agreement = agreement_repo::get_active_by_tenant(&state.db, req.tenant_id).await?;

    let payment = payment_repo::insert(
        &state.db,
        agreement.id,
        req.amount_eur,
        req.amount_ron,
        req.exchange_rate,
        req.due_date,
        &req.notes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    pub tenant_id: Uuid,
}

/// Handler for GET /api/admin/payments?tenant_id=
pub async fn list_payments(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(params): Query<PaymentListQuery>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let agreement = agreement_repo::get_active_by_tenant(&state.db, params.tenant_id).await?;
    Ok(Json(
        payment_repo::list_by_agreement(&state.db, agreement.id).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
    /// Recorded when the status moves to paid
    pub payment_date: Option<NaiveDate>,
}

/// Handler for PUT /api/admin/payments/{payment_id}/status
///
/// Status moves are manual administrator actions; there is no scheduled
/// pending -> overdue transition.
pub async fn update_payment_status(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(payment_id): Path<Uuid>,
    Json(req): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Payment>, ApiError> {
    let payment_date = match req.status {
        PaymentStatus::Paid => req.payment_date,
        _ => None,
    };

    let payment =
        payment_repo::update_status(&state.db, payment_id, req.status, payment_date).await?;

    tracing::info!(payment_id = %payment.id, status = ?payment.status, "payment status updated");
    Ok(Json(payment))
}
