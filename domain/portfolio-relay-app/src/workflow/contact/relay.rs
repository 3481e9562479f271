use std::sync::Arc;

use log::{debug, error, info};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::contact::{ContactEmail, ContactSubmission},
    ports::email::{DeliveryReceipt, EmailPort},
};

#[async_trait::async_trait]
pub trait RelayContactUseCase {
    async fn relay(
        &self,
        submission: ContactSubmission,
    ) -> Result<DeliveryReceipt, RelayContactError>;
}

#[derive(Debug, Clone, Error)]
pub enum RelayContactError {
    #[error("{0}")]
    Delivery(String),
}

pub struct RelayContactUseCaseImpl<E: EmailPort> {
    email_port: Arc<E>,
    operator_address: String,
}

impl<E: EmailPort> RelayContactUseCaseImpl<E> {
    pub fn new(email_port: Arc<E>, operator_address: String) -> Self {
        Self {
            email_port,
            operator_address,
        }
    }
}

#[async_trait::async_trait]
impl<E: EmailPort + Send + Sync + 'static> RelayContactUseCase for RelayContactUseCaseImpl<E> {
    async fn relay(
        &self,
        submission: ContactSubmission,
    ) -> Result<DeliveryReceipt, RelayContactError> {
        let submission_id = Uuid::new_v4();
        info!("Received contact submission {}", submission_id);
        debug!(
            "Contact submission {}: name={:?} email={:?} message={:?}",
            submission_id, submission.name, submission.email, submission.message
        );

        let email = ContactEmail::compose(&submission);

        info!("Sending email for contact submission {}", submission_id);
        match self
            .email_port
            .send_email(&self.operator_address, &email.subject, &email.body)
            .await
        {
            Ok(receipt) => {
                info!(
                    "Email sent for contact submission {}: {}",
                    submission_id, receipt.response
                );
                Ok(receipt)
            }
            Err(e) => {
                error!(
                    "Email error for contact submission {}: {}",
                    submission_id, e
                );
                Err(RelayContactError::Delivery(e.to_string()))
            }
        }
    }
}
