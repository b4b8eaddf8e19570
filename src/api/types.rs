use axum::{extract::State, Json};
use serde::Serialize;

use crate::registry::RegisteredType;
use crate::server::AppState;

/// Response for listing registered notification types
#[derive(Debug, Serialize)]
pub struct NotificationTypesResponse {
    pub types: Vec<RegisteredType>,
    pub total: usize,
}

/// GET /api/v1/notification-types
pub async fn list_notification_types(
    State(state): State<AppState>,
) -> Json<NotificationTypesResponse> {
    let types = state.registry.registered_types();
    let total = types.len();
    Json(NotificationTypesResponse { types, total })
}
