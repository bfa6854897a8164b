//! Read-side grouping of bills and rent payments for portal display
//!
//! Pure partition/sort functions over repo rows; no status transitions
//! happen here (overdue is set manually by the back office).

use chrono::{Datelike, NaiveDate};

use crate::repos::bill_repo::{Bill, BillStatus};
use crate::repos::payment_repo::Payment;

/// Paid history shown on the bills page is capped to the most recent rows
pub const PAID_BILLS_LIMIT: usize = 10;

/// Recent payments shown on the dashboard
pub const RECENT_PAYMENTS_LIMIT: usize = 5;

/// A tenant's bills grouped by status for display
#[derive(Debug, Default)]
pub struct BillBuckets {
    /// Unpaid bills, soonest due first
    pub unpaid: Vec<Bill>,
    /// Overdue bills, soonest due first
    pub overdue: Vec<Bill>,
    /// Most recently due paid bills, capped at `PAID_BILLS_LIMIT`
    pub paid: Vec<Bill>,
}

/// Partition a tenant's bills into display buckets
pub fn project_bills(bills: Vec<Bill>) -> BillBuckets {
    let mut buckets = BillBuckets::default();

    for bill in bills {
        match bill.status {
            BillStatus::Unpaid => buckets.unpaid.push(bill),
            BillStatus::Overdue => buckets.overdue.push(bill),
            BillStatus::Paid => buckets.paid.push(bill),
        }
    }

    buckets.unpaid.sort_by_key(|b| b.due_date);
    buckets.overdue.sort_by_key(|b| b.due_date);
    buckets.paid.sort_by_key(|b| std::cmp::Reverse(b.due_date));
    buckets.paid.truncate(PAID_BILLS_LIMIT);

    buckets
}

/// Open (unpaid or overdue) bills, soonest due first
pub fn open_bills(bills: &[Bill]) -> Vec<&Bill> {
    let mut open: Vec<&Bill> = bills
        .iter()
        .filter(|b| matches!(b.status, BillStatus::Unpaid | BillStatus::Overdue))
        .collect();
    open.sort_by_key(|b| b.due_date);
    open
}

/// Rent payments projected for display
#[derive(Debug)]
pub struct RentProjection {
    /// Most recent payments by due date, capped at `RECENT_PAYMENTS_LIMIT`
    pub recent: Vec<Payment>,
    /// The payment, if any, whose due date falls in the current month
    pub current_month: Option<Payment>,
}

/// Project a payment history (already ordered due-date descending)
pub fn project_rent(payments: Vec<Payment>, today: NaiveDate) -> RentProjection {
    let current_month = payments
        .iter()
        .find(|p| p.due_date.year() == today.year() && p.due_date.month() == today.month())
        .cloned();

    let mut recent = payments;
    recent.sort_by_key(|p| std::cmp::Reverse(p.due_date));
    recent.truncate(RECENT_PAYMENTS_LIMIT);

    RentProjection {
        recent,
        current_month,
    }
}
