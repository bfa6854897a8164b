use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use rentals_rs::repos::bill_repo::{Bill, BillStatus};
use rentals_rs::repos::payment_repo::{Payment, PaymentStatus};
use rentals_rs::services::billing_projection::{
    open_bills, project_bills, project_rent, PAID_BILLS_LIMIT, RECENT_PAYMENTS_LIMIT,
};

fn bill(status: BillStatus, due: NaiveDate) -> Bill {
    let now = Utc::now();
    Bill {
        id: Uuid::new_v4(),
        utility_type_id: Uuid::new_v4(),
        utility_type_name: "Electricity".into(),
        tenant_id: Uuid::new_v4(),
        amount: Decimal::from(100),
        due_date: due,
        bill_date: due,
        status,
        invoice_number: String::new(),
        paid_on: None,
        blob_key: None,
        notes: String::new(),
        created_at: now,
        updated_at: now,
    }
}

fn payment(due: NaiveDate) -> Payment {
    let now = Utc::now();
    Payment {
        id: Uuid::new_v4(),
        agreement_id: Uuid::new_v4(),
        amount_eur: Decimal::from(400),
        amount_ron: Decimal::from(2000),
        exchange_rate: "5.0000".parse().unwrap(),
        due_date: due,
        payment_date: None,
        status: PaymentStatus::Pending,
        notes: String::new(),
        created_at: now,
        updated_at: now,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_bills_are_partitioned_sorted_and_capped() {
    let mut bills = Vec::new();
    for d in [3, 1, 2] {
        bills.push(bill(BillStatus::Unpaid, date(2026, 9, d)));
    }
    for d in [20, 10] {
        bills.push(bill(BillStatus::Overdue, date(2026, 7, d)));
    }
    // Twelve paid bills, one per month
    for m in 1..=12 {
        bills.push(bill(BillStatus::Paid, date(2025, m, 15)));
    }

    let buckets = project_bills(bills);

    assert_eq!(buckets.unpaid.len(), 3);
    assert_eq!(buckets.overdue.len(), 2);
    assert_eq!(buckets.paid.len(), PAID_BILLS_LIMIT);

    // Open buckets are complete and ascending by due date
    let unpaid_days: Vec<u32> = buckets
        .unpaid
        .iter()
        .map(|b| chrono::Datelike::day(&b.due_date))
        .collect();
    assert_eq!(unpaid_days, vec![1, 2, 3]);

    let overdue_days: Vec<u32> = buckets
        .overdue
        .iter()
        .map(|b| chrono::Datelike::day(&b.due_date))
        .collect();
    assert_eq!(overdue_days, vec![10, 20]);

    // Paid bucket keeps only the most recent due dates, descending
    let paid_months: Vec<u32> = buckets
        .paid
        .iter()
        .map(|b| chrono::Datelike::month(&b.due_date))
        .collect();
    assert_eq!(paid_months, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
}

#[test]
fn test_empty_bill_list_projects_to_empty_buckets() {
    let buckets = project_bills(Vec::new());
    assert!(buckets.unpaid.is_empty());
    assert!(buckets.overdue.is_empty());
    assert!(buckets.paid.is_empty());
}

#[test]
fn test_open_bills_mixes_unpaid_and_overdue_by_due_date() {
    let bills = vec![
        bill(BillStatus::Unpaid, date(2026, 8, 20)),
        bill(BillStatus::Overdue, date(2026, 8, 5)),
        bill(BillStatus::Paid, date(2026, 8, 1)),
        bill(BillStatus::Unpaid, date(2026, 8, 10)),
    ];

    let open = open_bills(&bills);

    assert_eq!(open.len(), 3);
    let days: Vec<u32> = open
        .iter()
        .map(|b| chrono::Datelike::day(&b.due_date))
        .collect();
    assert_eq!(days, vec![5, 10, 20]);
}

#[test]
fn test_rent_projection_caps_recent_and_finds_current_month() {
    let today = date(2026, 8, 8);
    let mut payments: Vec<Payment> = (1..=9)
        .map(|m| payment(date(2026, m, 1)))
        .collect();
    payments.reverse();

    let projection = project_rent(payments, today);

    assert_eq!(projection.recent.len(), RECENT_PAYMENTS_LIMIT);
    let months: Vec<u32> = projection
        .recent
        .iter()
        .map(|p| chrono::Datelike::month(&p.due_date))
        .collect();
    assert_eq!(months, vec![9, 8, 7, 6, 5]);

    let current = projection.current_month.expect("august payment expected");
    assert_eq!(chrono::Datelike::month(&current.due_date), 8);
}

#[test]
fn test_rent_projection_without_current_month_payment() {
    let today = date(2026, 8, 8);
    let payments = vec![payment(date(2026, 6, 1)), payment(date(2026, 7, 1))];

    let projection = project_rent(payments, today);

    assert!(projection.current_month.is_none());
    assert_eq!(projection.recent.len(), 2);
}

#[test]
fn test_current_month_requires_matching_year() {
    let today = date(2026, 8, 8);
    let payments = vec![payment(date(2025, 8, 1))];

    let projection = project_rent(payments, today);

    assert!(projection.current_month.is_none());
}
