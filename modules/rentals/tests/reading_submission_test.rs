use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use mailer::{InMemoryMailer, Mailer};
use uuid::Uuid;

use rentals_rs::services::reading_store::InMemoryReadingStore;
use rentals_rs::services::reading_submission::{
    submit_reading, NotificationAddresses, ReadingSubmission, SubmissionError, SubmittingTenant,
};

fn addresses() -> NotificationAddresses {
    NotificationAddresses {
        from: "noreply@rentmanager.local".into(),
        admin: "admin@rentmanager.local".into(),
    }
}

fn tenant() -> SubmittingTenant {
    SubmittingTenant {
        id: Uuid::new_v4(),
        display_name: "Ana Pop".into(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
}

fn submission(meter_type_id: Uuid, value: &str) -> ReadingSubmission {
    ReadingSubmission {
        meter_type_id,
        reading_value: value.into(),
        notes: None,
    }
}

#[tokio::test]
async fn test_first_submission_creates_one_row() {
    let store = InMemoryReadingStore::new();
    let meter_id = store.add_meter_type("Electricity", "kWh", 25, 5, true);
    let mailer = Arc::new(InMemoryMailer::new());

    let result = submit_reading(
        &store,
        mailer.clone() as Arc<dyn Mailer>,
        addresses(),
        &tenant(),
        today(),
        submission(meter_id, "1234.5"),
    )
    .await
    .unwrap();

    assert_eq!(store.reading_count(), 1);
    assert!(!result.reading.is_processed);
    assert_eq!(result.reading.reading_date, today());
    assert_eq!(result.meter_type.name, "Electricity");
}

#[tokio::test]
async fn test_second_submission_same_day_is_rejected() {
    let store = InMemoryReadingStore::new();
    let meter_id = store.add_meter_type("Gas", "m³", 20, 10, true);
    let mailer = Arc::new(InMemoryMailer::new());
    let tenant = tenant();

    submit_reading(
        &store,
        mailer.clone() as Arc<dyn Mailer>,
        addresses(),
        &tenant,
        today(),
        submission(meter_id, "10"),
    )
    .await
    .unwrap();

    let second = submit_reading(
        &store,
        mailer.clone() as Arc<dyn Mailer>,
        addresses(),
        &tenant,
        today(),
        submission(meter_id, "11"),
    )
    .await;

    assert!(matches!(
        second,
        Err(SubmissionError::AlreadySubmittedToday)
    ));
    // No additional row was created
    assert_eq!(store.reading_count(), 1);
}

#[tokio::test]
async fn test_same_meter_different_tenants_both_succeed() {
    let store = InMemoryReadingStore::new();
    let meter_id = store.add_meter_type("Water", "m³", 15, 5, true);
    let mailer = Arc::new(InMemoryMailer::new());

    for _ in 0..2 {
        submit_reading(
            &store,
            mailer.clone() as Arc<dyn Mailer>,
            addresses(),
            &tenant(),
            today(),
            submission(meter_id, "7"),
        )
        .await
        .unwrap();
    }

    assert_eq!(store.reading_count(), 2);
}

#[tokio::test]
async fn test_invalid_values_are_rejected_without_a_row() {
    let store = InMemoryReadingStore::new();
    let meter_id = store.add_meter_type("Electricity", "kWh", 25, 5, true);
    let mailer = Arc::new(InMemoryMailer::new());

    for bad in ["-1", "-0.01", "abc", "", "12,5"] {
        let result = submit_reading(
            &store,
            mailer.clone() as Arc<dyn Mailer>,
            addresses(),
            &tenant(),
            today(),
            submission(meter_id, bad),
        )
        .await;

        assert!(
            matches!(result, Err(SubmissionError::InvalidValue)),
            "value {bad:?} should be rejected"
        );
    }

    assert_eq!(store.reading_count(), 0);
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_unknown_meter_type_is_rejected() {
    let store = InMemoryReadingStore::new();
    let mailer = Arc::new(InMemoryMailer::new());

    let result = submit_reading(
        &store,
        mailer.clone() as Arc<dyn Mailer>,
        addresses(),
        &tenant(),
        today(),
        submission(Uuid::new_v4(), "5"),
    )
    .await;

    assert!(matches!(result, Err(SubmissionError::MeterTypeNotFound)));
    assert_eq!(store.reading_count(), 0);
}

#[tokio::test]
async fn test_inactive_meter_type_is_rejected() {
    let store = InMemoryReadingStore::new();
    let meter_id = store.add_meter_type("Decommissioned", "kWh", 1, 31, false);
    let mailer = Arc::new(InMemoryMailer::new());

    let result = submit_reading(
        &store,
        mailer.clone() as Arc<dyn Mailer>,
        addresses(),
        &tenant(),
        today(),
        submission(meter_id, "5"),
    )
    .await;

    assert!(matches!(result, Err(SubmissionError::MeterTypeNotFound)));
    assert_eq!(store.reading_count(), 0);
}

#[tokio::test]
async fn test_notification_is_sent_after_success() {
    let store = InMemoryReadingStore::new();
    let meter_id = store.add_meter_type("Electricity", "kWh", 25, 5, true);
    let mailer = Arc::new(InMemoryMailer::new());

    submit_reading(
        &store,
        mailer.clone() as Arc<dyn Mailer>,
        addresses(),
        &tenant(),
        today(),
        submission(meter_id, "99.5"),
    )
    .await
    .unwrap();

    // The notification is dispatched fire-and-forget; give it a moment
    for _ in 0..50 {
        if mailer.sent_count() > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let sent = mailer.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Meter Reading Submitted - Electricity");
    assert_eq!(sent[0].to, vec!["admin@rentmanager.local".to_string()]);
    assert!(sent[0].body.contains("99.5 kWh"));
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_submission() {
    let store = InMemoryReadingStore::new();
    let meter_id = store.add_meter_type("Gas", "m³", 20, 10, true);
    let mailer = Arc::new(InMemoryMailer::failing());

    let result = submit_reading(
        &store,
        mailer.clone() as Arc<dyn Mailer>,
        addresses(),
        &tenant(),
        today(),
        submission(meter_id, "42"),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(store.reading_count(), 1);
}
