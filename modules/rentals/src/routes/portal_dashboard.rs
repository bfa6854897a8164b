//! Tenant portal dashboard

use axum::{extract::State, Json};
use serde::Serialize;

use crate::repos::agreement_repo;
use crate::repos::bill_repo::{self, Bill};
use crate::repos::payment_repo::{self, Payment};
use crate::repos::reading_repo::{self, Reading};
use crate::routes::portal_rent::AgreementView;
use crate::routes::ApiError;
use crate::services::billing_projection;
use crate::session::TenantSession;
use crate::state::AppState;

const UPCOMING_BILLS_LIMIT: usize = 5;
const RECENT_READINGS_LIMIT: i64 = 3;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub agreement: Option<AgreementView>,
    pub recent_payments: Vec<Payment>,
    /// Count of all unpaid and overdue bills
    pub pending_bills_count: usize,
    /// Open bills, soonest due first
    pub upcoming_bills: Vec<Bill>,
    pub recent_readings: Vec<Reading>,
}

/// Handler for GET /api/portal/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: TenantSession,
) -> Result<Json<DashboardResponse>, ApiError> {
    let tenant_id = session.tenant.id;

    let agreement = agreement_repo::find_active_by_tenant(&state.db, tenant_id).await?;

    let recent_payments = match &agreement {
        Some(agreement) => {
            let payments = payment_repo::list_by_agreement(&state.db, agreement.id).await?;
            billing_projection::project_rent(payments, state.today()).recent
        }
        None => Vec::new(),
    };

    let bills = bill_repo::list_by_tenant(&state.db, tenant_id).await?;
    let open = billing_projection::open_bills(&bills);
    let pending_bills_count = open.len();
    let upcoming_bills: Vec<Bill> = open
        .into_iter()
        .take(UPCOMING_BILLS_LIMIT)
        .cloned()
        .collect();

    let recent_readings =
        reading_repo::list_recent_by_tenant(&state.db, tenant_id, RECENT_READINGS_LIMIT).await?;

    Ok(Json(DashboardResponse {
        agreement: agreement
            .as_ref()
            .map(|a| AgreementView::from_agreement(a, state.converter.as_ref())),
        recent_payments,
        pending_bills_count,
        upcoming_bills,
        recent_readings,
    }))
}
