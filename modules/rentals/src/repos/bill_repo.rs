use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// Utility bill status, moved manually by the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "bill_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Unpaid,
    Paid,
    Overdue,
}

/// Utility bill joined with its catalog type name
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct Bill {
    pub id: Uuid,
    pub utility_type_id: Uuid,
    pub utility_type_name: String,
    pub tenant_id: Uuid,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub bill_date: NaiveDate,
    pub status: BillStatus,
    pub invoice_number: String,
    pub paid_on: Option<NaiveDate>,
    /// Opaque blob-store reference for the attached file, if any
    pub blob_key: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Download filename inferred from the bill's type and due date
    pub fn download_filename(&self) -> String {
        format!("{}_{}.pdf", self.utility_type_name, self.due_date)
    }
}

/// Errors that can occur during bill repository operations
#[derive(Debug, Error)]
pub enum BillError {
    #[error("Bill not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const BILL_SELECT: &str = r#"
    SELECT b.id, b.utility_type_id, ut.name AS utility_type_name, b.tenant_id,
           b.amount, b.due_date, b.bill_date, b.status, b.invoice_number,
           b.paid_on, b.blob_key, b.notes, b.created_at, b.updated_at
    FROM utility_bills b
    JOIN utility_types ut ON ut.id = b.utility_type_id
"#;

/// All of a tenant's bills; callers project them into status buckets
pub async fn list_by_tenant(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Bill>, sqlx::Error> {
    let sql = format!("{BILL_SELECT} WHERE b.tenant_id = $1 ORDER BY b.due_date DESC");
    sqlx::query_as::<_, Bill>(&sql)
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

/// Fetch a bill only if it belongs to the given tenant
pub async fn find_for_tenant(
    pool: &PgPool,
    bill_id: Uuid,
    tenant_id: Uuid,
) -> Result<Bill, BillError> {
    let sql = format!("{BILL_SELECT} WHERE b.id = $1 AND b.tenant_id = $2");
    sqlx::query_as::<_, Bill>(&sql)
        .bind(bill_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await?
        .ok_or(BillError::NotFound(bill_id))
}

pub async fn insert(
    pool: &PgPool,
    utility_type_id: Uuid,
    tenant_id: Uuid,
    amount: Decimal,
    due_date: NaiveDate,
    bill_date: NaiveDate,
    invoice_number: &str,
    notes: &str,
) -> Result<Bill, sqlx::Error> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO utility_bills
            (id, utility_type_id, tenant_id, amount, due_date, bill_date,
             invoice_number, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(utility_type_id)
    .bind(tenant_id)
    .bind(amount)
    .bind(due_date)
    .bind(bill_date)
    .bind(invoice_number)
    .bind(notes)
    .fetch_one(pool)
    .await?;

    let sql = format!("{BILL_SELECT} WHERE b.id = $1");
    sqlx::query_as::<_, Bill>(&sql).bind(id).fetch_one(pool).await
}

/// Manual status move; paid_on accompanies a move to paid
pub async fn update_status(
    pool: &PgPool,
    bill_id: Uuid,
    status: BillStatus,
    paid_on: Option<NaiveDate>,
) -> Result<Bill, BillError> {
    let updated = sqlx::query(
        r#"
        UPDATE utility_bills
        SET status = $2, paid_on = $3, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(bill_id)
    .bind(status)
    .bind(paid_on)
    .execute(pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(BillError::NotFound(bill_id));
    }

    let sql = format!("{BILL_SELECT} WHERE b.id = $1");
    Ok(sqlx::query_as::<_, Bill>(&sql)
        .bind(bill_id)
        .fetch_one(pool)
        .await?)
}

/// Record the blob-store reference for an uploaded attachment
pub async fn set_attachment(
    pool: &PgPool,
    bill_id: Uuid,
    blob_key: &str,
) -> Result<(), BillError> {
    let result = sqlx::query(
        r#"
        UPDATE utility_bills
        SET blob_key = $2, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(bill_id)
    .bind(blob_key)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BillError::NotFound(bill_id));
    }
    Ok(())
}
