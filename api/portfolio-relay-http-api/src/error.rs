use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portfolio_relay_app::workflow::contact::relay::RelayContactError;
use thiserror::Error;

#[derive(serde::Serialize)]
struct JsonErrorResponse {
    error: String,
    details: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The mail provider did not accept the message.
    #[error("Error sending email: {0}")]
    EmailDelivery(String),
}

impl From<RelayContactError> for ApiError {
    fn from(e: RelayContactError) -> Self {
        match e {
            RelayContactError::Delivery(details) => ApiError::EmailDelivery(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::EmailDelivery(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                JsonErrorResponse {
                    error: "Error sending email".to_string(),
                    details,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
