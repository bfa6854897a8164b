use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// Rent payment status, moved manually by the back office
///
/// There is no automatic pending -> overdue transition on elapsed due
/// dates; status changes are administrator actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

/// Rent payment record with dual EUR/RON amounts
///
/// amount_ron is stored as entered and never validated against
/// amount_eur * exchange_rate.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub agreement_id: Uuid,
    pub amount_eur: Decimal,
    pub amount_ron: Decimal,
    pub exchange_rate: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Errors that can occur during payment repository operations
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const PAYMENT_COLUMNS: &str = "id, agreement_id, amount_eur, amount_ron, exchange_rate, \
     due_date, payment_date, status, notes, created_at, updated_at";

/// All payments under an agreement, most recent due date first
pub async fn list_by_agreement(
    pool: &PgPool,
    agreement_id: Uuid,
) -> Result<Vec<Payment>, sqlx::Error> {
    let sql = format!(
        "SELECT {PAYMENT_COLUMNS} FROM rent_payments
         WHERE agreement_id = $1
         ORDER BY due_date DESC"
    );
    sqlx::query_as::<_, Payment>(&sql)
        .bind(agreement_id)
        .fetch_all(pool)
        .await
}

pub async fn insert(
    pool: &PgPool,
    agreement_id: Uuid,
    amount_eur: Decimal,
    amount_ron: Decimal,
    exchange_rate: Decimal,
    due_date: NaiveDate,
    notes: &str,
) -> Result<Payment, sqlx::Error> {
    let sql = format!(
        "INSERT INTO rent_payments
             (id, agreement_id, amount_eur, amount_ron, exchange_rate, due_date, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {PAYMENT_COLUMNS}"
    );
    sqlx::query_as::<_, Payment>(&sql)
        .bind(Uuid::new_v4())
        .bind(agreement_id)
        .bind(amount_eur)
        .bind(amount_ron)
        .bind(exchange_rate)
        .bind(due_date)
        .bind(notes)
        .fetch_one(pool)
        .await
}

/// Manual status move; payment_date accompanies a move to paid
pub async fn update_status(
    pool: &PgPool,
    payment_id: Uuid,
    status: PaymentStatus,
    payment_date: Option<NaiveDate>,
) -> Result<Payment, PaymentError> {
    let sql = format!(
        "UPDATE rent_payments
         SET status = $2, payment_date = $3, updated_at = now()
         WHERE id = $1
         RETURNING {PAYMENT_COLUMNS}"
    );
    sqlx::query_as::<_, Payment>(&sql)
        .bind(payment_id)
        .bind(status)
        .bind(payment_date)
        .fetch_optional(pool)
        .await?
        .ok_or(PaymentError::NotFound(payment_id))
}
