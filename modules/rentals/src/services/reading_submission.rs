//! Meter-reading submission workflow
//!
//! Validates a tenant's submission, enforces the one-reading-per-meter-
//! per-day rule, persists the reading, and dispatches a best-effort
//! notification to the back office. The notification is fire-and-forget:
//! its failure never fails the submission.

use std::sync::Arc;

use chrono::NaiveDate;
use mailer::{EmailMessage, Mailer};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::repos::meter_type_repo::MeterType;
use crate::repos::reading_repo::Reading;
use crate::services::reading_store::{NewReading, ReadingStore, StoreError};

/// Raw submission as received from the portal form
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReadingSubmission {
    pub meter_type_id: Uuid,
    /// Raw text; parsed as a non-negative decimal
    pub reading_value: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The tenant identity the submission is recorded under
///
/// Derived from the authenticated session, never from the request body.
#[derive(Debug, Clone)]
pub struct SubmittingTenant {
    pub id: Uuid,
    pub display_name: String,
}

/// Errors the workflow recovers into user-visible messages
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Invalid meter type selected")]
    MeterTypeNotFound,

    #[error("Invalid reading value")]
    InvalidValue,

    #[error("A reading was already submitted today for this meter type")]
    AlreadySubmittedToday,

    #[error("Storage error: {0}")]
    Store(String),
}

/// A successfully recorded submission
#[derive(Debug)]
pub struct SubmittedReading {
    pub reading: Reading,
    pub meter_type: MeterType,
}

/// Addresses used for the back-office notification
#[derive(Debug, Clone)]
pub struct NotificationAddresses {
    pub from: String,
    pub admin: String,
}

/// Submit a meter reading on behalf of an authenticated tenant
///
/// `today` is the current date in the application's configured zone;
/// the reading date is never client-supplied, so submissions cannot be
/// backdated.
pub async fn submit_reading(
    store: &dyn ReadingStore,
    mailer: Arc<dyn Mailer>,
    addresses: NotificationAddresses,
    tenant: &SubmittingTenant,
    today: NaiveDate,
    submission: ReadingSubmission,
) -> Result<SubmittedReading, SubmissionError> {
    let meter_type = store
        .find_active_meter_type(submission.meter_type_id)
        .await
        .map_err(storage_error)?
        .ok_or(SubmissionError::MeterTypeNotFound)?;

    let reading_value = parse_reading_value(&submission.reading_value)?;

    // Early exit; the unique constraint below remains the authoritative
    // guard under concurrent identical submissions.
    let already_submitted = store
        .reading_exists(meter_type.id, tenant.id, today)
        .await
        .map_err(storage_error)?;
    if already_submitted {
        return Err(SubmissionError::AlreadySubmittedToday);
    }

    let reading = store
        .insert_reading(NewReading {
            meter_type_id: meter_type.id,
            tenant_id: tenant.id,
            reading_value,
            reading_date: today,
            notes: submission.notes.unwrap_or_default(),
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate => SubmissionError::AlreadySubmittedToday,
            other => SubmissionError::Store(other.to_string()),
        })?;

    tracing::info!(
        tenant_id = %tenant.id,
        meter_type = %meter_type.name,
        reading_id = %reading.id,
        reading_date = %reading.reading_date,
        "meter reading recorded"
    );

    notify_reading_submitted(mailer, addresses, tenant, &meter_type, reading_value);

    Ok(SubmittedReading {
        reading,
        meter_type,
    })
}

/// Parse the raw form value as a non-negative decimal
fn parse_reading_value(raw: &str) -> Result<Decimal, SubmissionError> {
    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| SubmissionError::InvalidValue)?;
    if value < Decimal::ZERO {
        return Err(SubmissionError::InvalidValue);
    }
    Ok(value)
}

fn storage_error(e: StoreError) -> SubmissionError {
    SubmissionError::Store(e.to_string())
}

/// Fire-and-forget admin notification; failure is logged and swallowed
fn notify_reading_submitted(
    mailer: Arc<dyn Mailer>,
    addresses: NotificationAddresses,
    tenant: &SubmittingTenant,
    meter_type: &MeterType,
    reading_value: Decimal,
) {
    let message = EmailMessage::new(
        format!("New Meter Reading Submitted - {}", meter_type.name),
        format!(
            "Tenant {} has submitted a new {} reading: {} {}",
            tenant.display_name, meter_type.name, reading_value, meter_type.unit
        ),
        addresses.from,
        vec![addresses.admin],
    );

    let meter_name = meter_type.name.clone();
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&message).await {
            tracing::warn!(
                meter_type = %meter_name,
                error = %e,
                "reading notification failed; submission unaffected"
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_fractional_values() {
        assert_eq!(parse_reading_value("123").unwrap(), Decimal::from(123));
        assert_eq!(
            parse_reading_value(" 45.67 ").unwrap(),
            "45.67".parse::<Decimal>().unwrap()
        );
        assert_eq!(parse_reading_value("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn rejects_negative_and_non_numeric_values() {
        assert!(matches!(
            parse_reading_value("-1"),
            Err(SubmissionError::InvalidValue)
        ));
        assert!(matches!(
            parse_reading_value("abc"),
            Err(SubmissionError::InvalidValue)
        ));
        assert!(matches!(
            parse_reading_value(""),
            Err(SubmissionError::InvalidValue)
        ));
    }
}
