//! Meter overview and reading submission for the tenant portal

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::repos::meter_type_repo::{self, MeterType};
use crate::repos::reading_repo::{self, Reading};
use crate::routes::ApiError;
use crate::services::reading_period;
use crate::services::reading_store::PgReadingStore;
use crate::services::reading_submission::{
    self, NotificationAddresses, ReadingSubmission,
};
use crate::session::TenantSession;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MeterOverview {
    pub meter_type: MeterType,
    pub latest_reading: Option<Reading>,
    /// Whether today falls inside this meter's reading window
    pub in_reading_period: bool,
}

#[derive(Debug, Serialize)]
pub struct MetersResponse {
    pub meters: Vec<MeterOverview>,
    /// Ids of the meter types currently accepting readings
    pub meters_in_period: Vec<Uuid>,
    pub current_date: chrono::NaiveDate,
}

/// Handler for GET /api/portal/meters
pub async fn get_meters(
    State(state): State<AppState>,
    session: TenantSession,
) -> Result<Json<MetersResponse>, ApiError> {
    let today = state.today();
    let meter_types = meter_type_repo::list_active(&state.db).await?;

    let meters_in_period: Vec<Uuid> = reading_period::meters_in_period(&meter_types, today)
        .into_iter()
        .map(|mt| mt.id)
        .collect();

    let mut meters = Vec::with_capacity(meter_types.len());
    for meter_type in meter_types {
        let latest_reading =
            reading_repo::latest_for(&state.db, session.tenant.id, meter_type.id).await?;
        let in_reading_period = reading_period::is_in_reading_period(&meter_type, today);
        meters.push(MeterOverview {
            meter_type,
            latest_reading,
            in_reading_period,
        });
    }

    Ok(Json(MetersResponse {
        meters,
        meters_in_period,
        current_date: today,
    }))
}

#[derive(Debug, Serialize)]
pub struct SubmitReadingResponse {
    pub message: String,
    pub reading: Reading,
}

/// Handler for POST /api/portal/meters/readings
///
/// Invalid selections, unparseable values and duplicate submissions come
/// back as 4xx messages; the portal re-displays the meter list either way.
pub async fn submit_reading(
    State(state): State<AppState>,
    session: TenantSession,
    Json(submission): Json<ReadingSubmission>,
) -> Result<(StatusCode, Json<SubmitReadingResponse>), ApiError> {
    let store = PgReadingStore::new(state.db.clone());
    let tenant = session.submitting_tenant();

    let submitted = reading_submission::submit_reading(
        &store,
        state.mailer.clone(),
        NotificationAddresses {
            from: state.from_email.clone(),
            admin: state.admin_email.clone(),
        },
        &tenant,
        state.today(),
        submission,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitReadingResponse {
            message: format!(
                "{} reading submitted successfully",
                submitted.meter_type.name
            ),
            reading: submitted.reading,
        }),
    ))
}
