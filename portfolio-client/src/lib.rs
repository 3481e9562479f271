use log::debug;
use reqwest::header::{ACCEPT, ORIGIN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod form;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3001/send-email";

/// Fallback reason when a rejected request carries no readable error body.
pub const GENERIC_FAILURE: &str = "Failed to send message";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Body of a successful relay response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RelayReply {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Deserialize)]
struct JsonRelayError {
    error: Option<String>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{reason}")]
    Rejected { status: u16, reason: String },
}

#[derive(Clone)]
pub struct RelayClient {
    http_client: reqwest::Client,
    endpoint: String,
    origin: Option<String>,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            origin: None,
        }
    }

    /// Sends `Origin` like a browser on the portfolio site would.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub async fn send(&self, submission: &ContactSubmission) -> Result<RelayReply, SubmitError> {
        debug!("Sending data to server: {:?}", submission);
        let mut request = self
            .http_client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(submission);
        if let Some(origin) = &self.origin {
            request = request.header(ORIGIN, origin);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let reason = response
                .json::<JsonRelayError>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        let reply = response.json::<RelayReply>().await?;
        debug!("Response data: {:?}", reply);
        Ok(reply)
    }
}
