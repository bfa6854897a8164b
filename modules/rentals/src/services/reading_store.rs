//! Storage seam for the meter-reading submission workflow
//!
//! Mirrors the platform pattern of a trait with a production and an
//! in-memory implementation: `PgReadingStore` delegates to the sqlx repos,
//! `InMemoryReadingStore` backs the workflow's contract tests.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Mutex;
use uuid::Uuid;

use crate::repos::meter_type_repo::{self, MeterType};
use crate::repos::reading_repo::{self, Reading, ReadingError};

/// Errors surfaced by a reading store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The (meter_type, tenant, reading_date) triple already exists
    #[error("duplicate reading")]
    Duplicate,

    #[error("storage error: {0}")]
    Storage(String),
}

/// A reading about to be persisted
#[derive(Debug, Clone)]
pub struct NewReading {
    pub meter_type_id: Uuid,
    pub tenant_id: Uuid,
    pub reading_value: Decimal,
    pub reading_date: NaiveDate,
    pub notes: String,
}

/// Storage operations the submission workflow depends on
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Resolve a meter type only if it exists and is active
    async fn find_active_meter_type(&self, id: Uuid) -> Result<Option<MeterType>, StoreError>;

    /// Whether a reading exists for the (meter_type, tenant, date) triple
    async fn reading_exists(
        &self,
        meter_type_id: Uuid,
        tenant_id: Uuid,
        reading_date: NaiveDate,
    ) -> Result<bool, StoreError>;

    /// Persist a new unprocessed reading
    ///
    /// Must fail with `StoreError::Duplicate` when the unique triple is
    /// violated, so a concurrent identical submission and the pre-check
    /// produce the same outcome.
    async fn insert_reading(&self, new: NewReading) -> Result<Reading, StoreError>;
}

/// Production store over the Postgres repos
pub struct PgReadingStore {
    pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn find_active_meter_type(&self, id: Uuid) -> Result<Option<MeterType>, StoreError> {
        meter_type_repo::find_active(&self.pool, id)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    async fn reading_exists(
        &self,
        meter_type_id: Uuid,
        tenant_id: Uuid,
        reading_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        reading_repo::exists_for(&self.pool, meter_type_id, tenant_id, reading_date)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    async fn insert_reading(&self, new: NewReading) -> Result<Reading, StoreError> {
        reading_repo::insert(
            &self.pool,
            new.meter_type_id,
            new.tenant_id,
            new.reading_value,
            new.reading_date,
            &new.notes,
        )
        .await
        .map_err(|e| match e {
            ReadingError::Duplicate => StoreError::Duplicate,
            other => StoreError::Storage(other.to_string()),
        })
    }
}

/// In-memory store for dev/test
#[derive(Default)]
pub struct InMemoryReadingStore {
    meter_types: Mutex<Vec<MeterType>>,
    readings: Mutex<Vec<Reading>>,
}

impl InMemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a meter type and return its id
    pub fn add_meter_type(
        &self,
        name: &str,
        unit: &str,
        reading_day_start: i32,
        reading_day_end: i32,
        is_active: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.meter_types
            .lock()
            .expect("store lock poisoned")
            .push(MeterType {
                id,
                name: name.to_string(),
                unit: unit.to_string(),
                reading_day_start,
                reading_day_end,
                is_active,
                created_at: now,
                updated_at: now,
            });
        id
    }

    pub fn reading_count(&self) -> usize {
        self.readings.lock().expect("store lock poisoned").len()
    }
}

#[async_trait]
impl ReadingStore for InMemoryReadingStore {
    async fn find_active_meter_type(&self, id: Uuid) -> Result<Option<MeterType>, StoreError> {
        Ok(self
            .meter_types
            .lock()
            .expect("store lock poisoned")
            .iter()
            .find(|mt| mt.id == id && mt.is_active)
            .cloned())
    }

    async fn reading_exists(
        &self,
        meter_type_id: Uuid,
        tenant_id: Uuid,
        reading_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        Ok(self
            .readings
            .lock()
            .expect("store lock poisoned")
            .iter()
            .any(|r| {
                r.meter_type_id == meter_type_id
                    && r.tenant_id == tenant_id
                    && r.reading_date == reading_date
            }))
    }

    async fn insert_reading(&self, new: NewReading) -> Result<Reading, StoreError> {
        let mut readings = self.readings.lock().expect("store lock poisoned");

        // Enforce the unique triple the way the database constraint does
        let duplicate = readings.iter().any(|r| {
            r.meter_type_id == new.meter_type_id
                && r.tenant_id == new.tenant_id
                && r.reading_date == new.reading_date
        });
        if duplicate {
            return Err(StoreError::Duplicate);
        }

        let now = Utc::now();
        let reading = Reading {
            id: Uuid::new_v4(),
            meter_type_id: new.meter_type_id,
            tenant_id: new.tenant_id,
            reading_value: new.reading_value,
            reading_date: new.reading_date,
            notes: new.notes,
            is_processed: false,
            created_at: now,
            updated_at: now,
        };
        readings.push(reading.clone());
        Ok(reading)
    }
}
