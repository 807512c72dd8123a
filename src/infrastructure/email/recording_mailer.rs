use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{Mailer, MailerError, OutgoingEmail};

/// Keeps sent emails in memory. Can be switched to fail every delivery.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError> {
        if self.failing {
            return Err(MailerError::DeliveryFailed("smtp unavailable".to_string()));
        }
        self.sent.lock().await.push(email);
        Ok(())
    }
}
