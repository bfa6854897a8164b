use async_trait::async_trait;

use crate::{EmailMessage, MailError, MailResult, Mailer};

/// Production mailer posting messages to an HTTP mail gateway
///
/// The gateway accepts a JSON body with `subject`, `body`, `from` and `to`
/// fields and responds 2xx on acceptance.
pub struct HttpMailer {
    client: reqwest::Client,
    gateway_url: String,
}

impl HttpMailer {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url: gateway_url.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> MailResult<()> {
        if message.to.is_empty() {
            return Err(MailError::NoRecipients);
        }

        let response = self
            .client
            .post(&self.gateway_url)
            .json(message)
            .send()
            .await
            .map_err(|e| MailError::DeliveryError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected(format!("{}: {}", status, detail)));
        }

        tracing::debug!(
            subject = %message.subject,
            recipients = message.to.len(),
            "mail accepted by gateway"
        );

        Ok(())
    }
}
