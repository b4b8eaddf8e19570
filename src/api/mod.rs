//! API layer - HTTP endpoint handlers.

mod health;
mod metrics;
mod notify;
mod routes;
mod types;

pub use health::{health, HealthResponse};
pub use metrics::prometheus_metrics;
pub use notify::{notify, NotifyResponse};
pub use routes::api_routes;
pub use types::{list_notification_types, NotificationTypesResponse};
