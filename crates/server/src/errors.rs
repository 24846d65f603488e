use adforge::PlanError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors originating from the campaign generation pipeline.
    Plan(PlanError),
    /// The authenticated user is not allowed to perform the operation.
    Forbidden(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `PlanError` to `AppError`.
impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        AppError::Plan(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Plan(err) => {
                // The full error is logged server-side only. The response body
                // stays generic so prompts and API keys never reach the caller.
                error!("Campaign generation failed: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate campaign.".to_string(),
                )
            }
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
