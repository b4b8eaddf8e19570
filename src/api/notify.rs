//! HTTP entry point for `notify`

use axum::{body::Bytes, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::notification::Notification;
use crate::server::AppState;
use crate::sink::DeliveryOutcome;

/// Response of the notify endpoint
///
/// `delivered` is false when the input was rejected by validation; the
/// reason is logged, not returned.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<DeliveryOutcome>,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/v1/notifications
///
/// The body is the single `notify` argument. An empty body counts as no argument.
#[tracing::instrument(name = "http.notify", skip(state, body), fields(body_len = body.len()))]
pub async fn notify(State(state): State<AppState>, body: Bytes) -> Result<Json<NotifyResponse>> {
    let input: Option<Value> = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let value = serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))?;
        Some(value)
    };

    let notified = state.service.notify(input.as_ref()).await?;

    let response = match notified {
        Some(notified) => NotifyResponse {
            delivered: true,
            notification: Some(notified.notification),
            outcome: Some(notified.outcome),
            timestamp: Utc::now(),
        },
        None => NotifyResponse {
            delivered: false,
            notification: None,
            outcome: None,
            timestamp: Utc::now(),
        },
    };

    Ok(Json(response))
}
