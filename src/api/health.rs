use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sink: String,
    pub prefix: String,
    pub registered_types: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sink: state.service.sink_name().to_string(),
        prefix: state.service.namespace().prefix().to_string(),
        registered_types: state.registry.len(),
    })
}
