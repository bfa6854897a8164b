//! Back-office catalog management: utility types and meter types

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::repos::meter_type_repo::{self, MeterType};
use crate::repos::utility_type_repo::{self, UtilityType};
use crate::routes::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUtilityTypeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Handler for POST /api/admin/utility-types
pub async fn create_utility_type(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<CreateUtilityTypeRequest>,
) -> Result<(StatusCode, Json<UtilityType>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let utility_type =
        utility_type_repo::insert(&state.db, req.name.trim(), &req.description).await?;
    Ok((StatusCode::CREATED, Json(utility_type)))
}

/// Handler for GET /api/admin/utility-types
pub async fn list_utility_types(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<Vec<UtilityType>>, ApiError> {
    Ok(Json(utility_type_repo::list(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUtilityTypeRequest {
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
}

/// Handler for PUT /api/admin/utility-types/{id}
pub async fn update_utility_type(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUtilityTypeRequest>,
) -> Result<Json<UtilityType>, ApiError> {
    Ok(Json(
        utility_type_repo::update(&state.db, id, &req.description, req.is_active).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct CreateMeterTypeRequest {
    pub name: String,
    pub unit: String,
    pub reading_day_start: i32,
    pub reading_day_end: i32,
}

fn validate_reading_days(start: i32, end: i32) -> Result<(), ApiError> {
    if !(1..=31).contains(&start) || !(1..=31).contains(&end) {
        return Err(ApiError::bad_request(
            "reading days must be between 1 and 31",
        ));
    }
    Ok(())
}

/// Handler for POST /api/admin/meter-types
pub async fn create_meter_type(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<CreateMeterTypeRequest>,
) -> Result<(StatusCode, Json<MeterType>), ApiError> {
    if req.name.trim().is_empty() || req.unit.trim().is_empty() {
        return Err(ApiError::bad_request("name and unit are required"));
    }
    validate_reading_days(req.reading_day_start, req.reading_day_end)?;

    let meter_type = meter_type_repo::insert(
        &state.db,
        req.name.trim(),
        req.unit.trim(),
        req.reading_day_start,
        req.reading_day_end,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(meter_type)))
}

/// Handler for GET /api/admin/meter-types
pub async fn list_meter_types(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<Vec<MeterType>>, ApiError> {
    Ok(Json(meter_type_repo::list(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeterTypeRequest {
    pub unit: String,
    pub reading_day_start: i32,
    pub reading_day_end: i32,
    pub is_active: bool,
}

/// Handler for PUT /api/admin/meter-types/{id}
pub async fn update_meter_type(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMeterTypeRequest>,
) -> Result<Json<MeterType>, ApiError> {
    validate_reading_days(req.reading_day_start, req.reading_day_end)?;

    Ok(Json(
        meter_type_repo::update(
            &state.db,
            id,
            &req.unit,
            req.reading_day_start,
            req.reading_day_end,
            req.is_active,
        )
        .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_day_bounds_are_enforced() {
        assert!(validate_reading_days(1, 31).is_ok());
        assert!(validate_reading_days(25, 5).is_ok());
        assert!(validate_reading_days(0, 5).is_err());
        assert!(validate_reading_days(1, 32).is_err());
    }
}
