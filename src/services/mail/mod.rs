pub mod secrets;
pub mod smtp;

use async_trait::async_trait;

use crate::services::notification::NotificationEmail;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport is not configured: {0}")]
    NotConfigured(String),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &NotificationEmail) -> Result<(), MailError>;

    /// Startup health check. Must only log, never fail.
    async fn verify(&self) {}
}
