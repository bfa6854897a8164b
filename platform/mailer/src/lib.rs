//! # Mailer Abstraction
//!
//! A platform-level abstraction for outbound mail delivery.
//!
//! ## Implementations
//!
//! - **HttpMailer**: Production implementation posting to an HTTP mail gateway
//! - **InMemoryMailer**: Test/dev implementation recording sends in memory
//!
//! Delivery is treated as best-effort by callers: a failed send is reported
//! through `MailError` and the caller decides whether to swallow it.

mod http_mailer;
mod inmemory_mailer;

pub use http_mailer::HttpMailer;
pub use inmemory_mailer::InMemoryMailer;

use async_trait::async_trait;

/// An outbound email message
#[derive(Debug, Clone, serde::Serialize)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

impl EmailMessage {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        from: impl Into<String>,
        to: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            to,
        }
    }
}

/// Errors that can occur when sending mail
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("failed to deliver message: {0}")]
    DeliveryError(String),

    #[error("gateway rejected message: {0}")]
    Rejected(String),

    #[error("message has no recipients")]
    NoRecipients,
}

/// Result type for mailer operations
pub type MailResult<T> = Result<T, MailError>;

/// Core mailer abstraction
///
/// All implementations must be safe to share across request handlers.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single message
    ///
    /// # Returns
    /// * `Ok(())` if the message was accepted for delivery
    /// * `Err(MailError)` if delivery failed or was rejected
    async fn send(&self, message: &EmailMessage) -> MailResult<()>;
}
