use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::{api_key_auth, AppState};

use super::{health, list_notification_types, notify, prometheus_metrics};

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Notification endpoints
        .nest(
            "/api/v1",
            Router::new()
                .route("/notifications", post(notify))
                .route("/notification-types", get(list_notification_types))
                .route_layer(middleware::from_fn_with_state(state, api_key_auth)),
        )
}
