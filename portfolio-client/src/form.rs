use std::fmt;

use log::error;

use crate::{ContactSubmission, RelayClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Sent,
    Failed(String),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Sent => write!(f, "Message sent successfully!"),
            Notification::Failed(reason) => write!(f, "Failed to send message: {}", reason),
        }
    }
}

/// Shows a notification and waits for it to be acknowledged.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) {
        self.push(notification.clone());
    }
}

/// The three contact form fields as currently filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn to_submission(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Submits the form once. The fields are cleared only when the relay
    /// accepted the message.
    pub async fn submit(
        &mut self,
        client: &RelayClient,
        notifier: &mut impl Notifier,
    ) -> Notification {
        let notification = match client.send(&self.to_submission()).await {
            Ok(_) => {
                self.reset();
                Notification::Sent
            }
            Err(e) => {
                error!("Error details: {:?}", e);
                let reason = e.to_string();
                if reason.is_empty() {
                    Notification::Failed("Please try again.".to_string())
                } else {
                    Notification::Failed(reason)
                }
            }
        };
        notifier.notify(&notification);
        notification
    }
}
