//! Back-office system settings

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::repos::settings_repo::{self, Setting};
use crate::routes::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;

/// Handler for GET /api/admin/settings
pub async fn list_settings(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<Vec<Setting>>, ApiError> {
    Ok(Json(settings_repo::list(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpsertSettingRequest {
    pub value: String,
    #[serde(default)]
    pub description: String,
}

/// Handler for PUT /api/admin/settings/{key}
pub async fn upsert_setting(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(key): Path<String>,
    Json(req): Json<UpsertSettingRequest>,
) -> Result<Json<Setting>, ApiError> {
    if key.trim().is_empty() {
        return Err(ApiError::bad_request("setting key is required"));
    }

    let setting =
        settings_repo::upsert(&state.db, key.trim(), &req.value, &req.description).await?;
    Ok(Json(setting))
}
