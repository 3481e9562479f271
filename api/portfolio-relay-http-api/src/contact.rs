use axum::{Json, extract::State};
use portfolio_relay_app::domain::contact::ContactSubmission;

use crate::{AppState, error::ApiError};

#[derive(serde::Deserialize, Debug)]
pub struct JsonContactSubmission {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

impl From<JsonContactSubmission> for ContactSubmission {
    fn from(json: JsonContactSubmission) -> Self {
        ContactSubmission::new(json.name, json.email, json.message)
    }
}

#[derive(serde::Serialize)]
pub struct JsonEmailSentResponse {
    message: String,
    details: String,
}

pub async fn send_email(
    State(app_state): State<AppState>,
    Json(submission): Json<JsonContactSubmission>,
) -> Result<Json<JsonEmailSentResponse>, ApiError> {
    let receipt = app_state
        .app
        .relay_contact_use_case
        .relay(submission.into())
        .await?;

    Ok(Json(JsonEmailSentResponse {
        message: "Email sent successfully".to_string(),
        details: receipt.response,
    }))
}
