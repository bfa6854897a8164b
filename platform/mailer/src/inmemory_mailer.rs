use async_trait::async_trait;
use std::sync::Mutex;

use crate::{EmailMessage, MailError, MailResult, Mailer};

/// In-memory mailer for dev/test
///
/// Records every accepted message so tests can assert on what was sent.
/// Can be flipped into a failing mode to exercise best-effort callers.
#[derive(Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<EmailMessage>>,
    fail_sends: bool,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails with a delivery error
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: true,
        }
    }

    /// Messages accepted so far, oldest first
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("mailer lock poisoned").len()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, message: &EmailMessage) -> MailResult<()> {
        if message.to.is_empty() {
            return Err(MailError::NoRecipients);
        }
        if self.fail_sends {
            return Err(MailError::DeliveryError("in-memory mailer set to fail".into()));
        }

        self.sent
            .lock()
            .expect("mailer lock poisoned")
            .push(message.clone());

        tracing::debug!(subject = %message.subject, "mail recorded in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_sent_messages() {
        let mailer = InMemoryMailer::new();
        let msg = EmailMessage::new("hi", "body", "from@x", vec!["to@x".into()]);

        mailer.send(&msg).await.unwrap();

        assert_eq!(mailer.sent_count(), 1);
        assert_eq!(mailer.sent_messages()[0].subject, "hi");
    }

    #[tokio::test]
    async fn rejects_empty_recipient_list() {
        let mailer = InMemoryMailer::new();
        let msg = EmailMessage::new("hi", "body", "from@x", vec![]);

        assert!(matches!(
            mailer.send(&msg).await,
            Err(MailError::NoRecipients)
        ));
    }

    #[tokio::test]
    async fn failing_mailer_fails_every_send() {
        let mailer = InMemoryMailer::failing();
        let msg = EmailMessage::new("hi", "body", "from@x", vec!["to@x".into()]);

        assert!(mailer.send(&msg).await.is_err());
        assert_eq!(mailer.sent_count(), 0);
    }
}
