use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// The mail provider's final reply for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub response: String,
}

impl DeliveryReceipt {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum SendEmailError {
    #[error("Invalid to address: {0}")]
    InvalidToAddress(String),
    #[error("Failed to build email: {0}")]
    Build(String),
    #[error("Failed to send email: {0}")]
    Transport(String),
}

#[async_trait::async_trait]
pub trait EmailPort {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<DeliveryReceipt, SendEmailError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Records every email instead of delivering it. When `failure` is set, each
/// send is recorded and then reported as a transport error.
#[derive(Clone, Default)]
pub struct MockEmailPort {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failure: Option<String>,
}

#[allow(unused)]
impl MockEmailPort {
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(reason.into()),
        }
    }

    pub fn get_sent(&self) -> Vec<SentEmail> {
        self.sent.lock().clone()
    }
}

#[async_trait::async_trait]
impl EmailPort for MockEmailPort {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<DeliveryReceipt, SendEmailError> {
        self.sent.lock().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        match &self.failure {
            Some(reason) => Err(SendEmailError::Transport(reason.clone())),
            None => Ok(DeliveryReceipt::new("250 2.0.0 OK queued")),
        }
    }
}
