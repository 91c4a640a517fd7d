use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("Email service is not configured. Please check SMTP credentials.")]
    MailNotConfigured,

    #[error("mail transport error: {0}")]
    Mail(String),
}

impl AppError {
    /// Message returned to the caller. Transport details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Mail(_) => "Failed to send service request. Please try again later.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MailNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.public_message() });
        (status, axum::Json(body)).into_response()
    }
}
