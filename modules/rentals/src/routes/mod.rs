//! HTTP route handlers for the tenant portal and the back office
//!
//! Handlers share one error wrapper that maps domain error kinds onto
//! status codes; recoverable workflow failures become 4xx messages, never
//! bare 500s.

pub mod admin_bills;
pub mod admin_catalog;
pub mod admin_payments;
pub mod admin_readings;
pub mod admin_settings;
pub mod admin_tenants;
pub mod portal_bills;
pub mod portal_dashboard;
pub mod portal_meters;
pub mod portal_rent;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use crate::repos::agreement_repo::AgreementError;
use crate::repos::bill_repo::BillError;
use crate::repos::meter_type_repo::MeterTypeError;
use crate::repos::payment_repo::PaymentError;
use crate::repos::reading_repo::ReadingError;
use crate::repos::tenant_repo::TenantError;
use crate::repos::utility_type_repo::UtilityTypeError;
use crate::services::reading_submission::SubmissionError;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error wrapper for proper HTTP error handling
#[derive(Debug)]
pub enum ApiError {
    /// Administrators invoking portal operations are sent to the back office
    RedirectToBackOffice,
    Status(StatusCode, String),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Status(StatusCode::UNAUTHORIZED, msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Status(StatusCode::FORBIDDEN, msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::Status(StatusCode::NOT_FOUND, msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::Status(StatusCode::BAD_REQUEST, msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Status(StatusCode::CONFLICT, msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Status(StatusCode::INTERNAL_SERVER_ERROR, msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::RedirectToBackOffice => Redirect::to("/api/admin").into_response(),
            ApiError::Status(status, message) => {
                (status, Json(ErrorResponse { error: message })).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        Self::internal("database error")
    }
}

impl From<TenantError> for ApiError {
    fn from(e: TenantError) -> Self {
        match e {
            TenantError::NotFound(_) => Self::not_found("tenant not found"),
            TenantError::Database(db) => db.into(),
        }
    }
}

impl From<AgreementError> for ApiError {
    fn from(e: AgreementError) -> Self {
        match e {
            AgreementError::NotFound(_) => Self::not_found("no active rent agreement"),
            AgreementError::Database(db) => db.into(),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::NotFound(_) => Self::not_found("payment not found"),
            PaymentError::Database(db) => db.into(),
        }
    }
}

impl From<BillError> for ApiError {
    fn from(e: BillError) -> Self {
        match e {
            BillError::NotFound(_) => Self::not_found("bill not found"),
            BillError::Database(db) => db.into(),
        }
    }
}

impl From<UtilityTypeError> for ApiError {
    fn from(e: UtilityTypeError) -> Self {
        match e {
            UtilityTypeError::NotFound(_) => Self::not_found("utility type not found"),
            UtilityTypeError::DuplicateName(name) => {
                Self::conflict(format!("utility type name already exists: {name}"))
            }
            UtilityTypeError::Database(db) => db.into(),
        }
    }
}

impl From<MeterTypeError> for ApiError {
    fn from(e: MeterTypeError) -> Self {
        match e {
            MeterTypeError::NotFound(_) => Self::not_found("meter type not found"),
            MeterTypeError::DuplicateName(name) => {
                Self::conflict(format!("meter type name already exists: {name}"))
            }
            MeterTypeError::Database(db) => db.into(),
        }
    }
}

impl From<ReadingError> for ApiError {
    fn from(e: ReadingError) -> Self {
        match e {
            ReadingError::NotFound(_) => Self::not_found("reading not found"),
            ReadingError::Duplicate => {
                Self::conflict("reading already submitted for this meter type and date")
            }
            ReadingError::Database(db) => db.into(),
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::MeterTypeNotFound => Self::not_found("Invalid meter type selected"),
            SubmissionError::InvalidValue => Self::bad_request("Invalid reading value"),
            SubmissionError::AlreadySubmittedToday => {
                Self::conflict("A reading was already submitted today for this meter type")
            }
            SubmissionError::Store(msg) => {
                tracing::error!(error = %msg, "reading store error");
                Self::internal("storage error")
            }
        }
    }
}
