//! Back-office meter reading review

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::repos::reading_repo::{self, Reading};
use crate::routes::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReadingListQuery {
    /// Filter by processed state; absent returns everything
    pub processed: Option<bool>,
}

/// Handler for GET /api/admin/readings
pub async fn list_readings(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(params): Query<ReadingListQuery>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    Ok(Json(reading_repo::list(&state.db, params.processed).await?))
}

/// Handler for POST /api/admin/readings/{reading_id}/process
///
/// created -> processed is the only transition and it is terminal.
pub async fn process_reading(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(reading_id): Path<Uuid>,
) -> Result<Json<Reading>, ApiError> {
    let reading = reading_repo::mark_processed(&state.db, reading_id).await?;
    tracing::info!(reading_id = %reading.id, "reading marked processed");
    Ok(Json(reading))
}
