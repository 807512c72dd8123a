use async_trait::async_trait;

use crate::application::ports::{Mailer, MailerError, OutgoingEmail};

/// Used when SMTP is disabled: emails are logged, never delivered.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError> {
        tracing::info!(to = %email.to, subject = %email.subject, "Email delivery disabled, skipping");
        Ok(())
    }
}
