//! Delivering text messages through an external service.

pub mod twilio;

use async_trait::async_trait;

/// Why a message could not be delivered.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The provider could not be reached, or didn't answer in time.
    #[error("failed to reach the provider: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("rejected by the provider ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("sending SMS is not configured")]
    NotConfigured,
}

impl SmsError {
    /// If sending the same message again might succeed.
    pub fn retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::NotConfigured => false,
        }
    }
}

#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Hand a message over for delivery to `to`.
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError>;
}

/// Used when no provider is configured, every message fails.
pub struct Disabled;

#[async_trait]
impl SmsProvider for Disabled {
    async fn send(&self, _to: &str, _body: &str) -> Result<(), SmsError> {
        Err(SmsError::NotConfigured)
    }
}
