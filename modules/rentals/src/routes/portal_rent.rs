//! Rent status and payment history for the tenant portal

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::repos::agreement_repo::{self, Agreement};
use crate::repos::payment_repo::{self, Payment};
use crate::routes::ApiError;
use crate::services::billing_projection;
use crate::services::currency::CurrencyConverter;
use crate::session::TenantSession;
use crate::state::AppState;

/// Agreement enriched with the converted RON rent for display
#[derive(Debug, Serialize)]
pub struct AgreementView {
    pub id: uuid::Uuid,
    pub monthly_rent_eur: Decimal,
    pub monthly_rent_ron: Decimal,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    pub is_active: bool,
}

impl AgreementView {
    pub fn from_agreement(agreement: &Agreement, converter: &dyn CurrencyConverter) -> Self {
        Self {
            id: agreement.id,
            monthly_rent_eur: agreement.monthly_rent_eur,
            monthly_rent_ron: converter.eur_to_ron(agreement.monthly_rent_eur),
            start_date: agreement.start_date,
            end_date: agreement.end_date,
            is_active: agreement.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RentStatusResponse {
    pub agreement: AgreementView,
    pub current_month_payment: Option<Payment>,
    pub payments: Vec<Payment>,
}

/// Handler for GET /api/portal/rent
///
/// Requires an active agreement; fails with 404 when the tenant has none.
pub async fn get_rent_status(
    State(state): State<AppState>,
    session: TenantSession,
) -> Result<Json<RentStatusResponse>, ApiError> {
    let agreement = agreement_repo::get_active_by_tenant(&state.db, session.tenant.id).await?;

    let payments = payment_repo::list_by_agreement(&state.db, agreement.id).await?;

    let current_month_payment = billing_projection::project_rent(payments.clone(), state.today())
        .current_month;

    Ok(Json(RentStatusResponse {
        agreement: AgreementView::from_agreement(&agreement, state.converter.as_ref()),
        current_month_payment,
        payments,
    }))
}
