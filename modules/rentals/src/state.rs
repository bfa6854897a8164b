use std::sync::Arc;

use blob_storage::BlobStore;
use chrono::Utc;
use chrono_tz::Tz;
use mailer::Mailer;
use sqlx::PgPool;

use crate::services::currency::CurrencyConverter;

/// Shared application state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub mailer: Arc<dyn Mailer>,
    pub blobs: Arc<dyn BlobStore>,
    pub converter: Arc<dyn CurrencyConverter>,
    pub time_zone: Tz,
    pub admin_email: String,
    pub from_email: String,
}

impl AppState {
    /// Today's calendar date in the configured application zone
    ///
    /// Reading dates are always derived here, never taken from the client,
    /// so submissions cannot be backdated.
    pub fn today(&self) -> chrono::NaiveDate {
        Utc::now().with_timezone(&self.time_zone).date_naive()
    }
}
