use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::registry::RegistryError;
use crate::sink::SinkError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] SinkError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

fn redacted(log_message: &str, public_message: &str) -> String {
    if is_production() {
        public_message.to_string()
    } else {
        log_message.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let log_message = self.to_string();
        let (status, code, client_message) = match &self {
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                redacted(&log_message, "Configuration error"),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Registry(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "REGISTRY_ERROR",
                redacted(&log_message, "Notification types unavailable"),
            ),
            AppError::Delivery(SinkError::DestinationNotFound(_)) => (
                StatusCode::BAD_GATEWAY,
                "DESTINATION_NOT_FOUND",
                redacted(&log_message, "Notification destination unavailable"),
            ),
            AppError::Delivery(_) => (
                StatusCode::BAD_GATEWAY,
                "DELIVERY_FAILED",
                redacted(&log_message, "Notification delivery failed"),
            ),
        };

        // Always log the detailed error server-side
        tracing::error!(
            code = %code,
            status = %status.as_u16(),
            message = %log_message,
            "API error"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: client_message,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let response = AppError::Validation("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            AppError::Delivery(SinkError::DestinationNotFound("SAP_Notifications".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::Delivery(SinkError::Rejected {
            destination: "SAP_Notifications".to_string(),
            status: 500,
            body: String::new(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
