use std::sync::Arc;

use crate::{
    ports::email::EmailPort,
    workflow::contact::relay::{RelayContactUseCase, RelayContactUseCaseImpl},
};

pub mod domain;
pub mod ports;
pub mod workflow;

pub struct Application {
    pub relay_contact_use_case: Box<dyn RelayContactUseCase + Send + Sync + 'static>,
}

/// Wires the use cases against the given adapters. `operator_address` is the
/// mailbox every contact email is delivered to.
pub fn build_application<E: EmailPort + Send + Sync + 'static>(
    email_port: Arc<E>,
    operator_address: impl Into<String>,
) -> Application {
    let relay_contact_use_case = Box::new(RelayContactUseCaseImpl::new(
        email_port,
        operator_address.into(),
    ));

    Application {
        relay_contact_use_case,
    }
}
