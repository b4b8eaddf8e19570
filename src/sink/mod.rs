//! Notification sinks.
//!
//! A sink receives every successfully built [`Notification`]:
//!
//! - `ConsoleSink`: logs the notification and checks it against the local
//!   types registry. Never talks to a remote service.
//! - `RemoteSink`: resolves the configured destination and forwards the
//!   notification to the remote notification service.
//!
//! Use `create_sink()` to pick the sink configured in the settings.

mod console;
mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::NotificationsConfig;
use crate::destination::DestinationResolver;
use crate::notification::Notification;
use crate::registry::{NotificationTypeRegistry, RegistryCheck};

pub use console::ConsoleSink;
pub use remote::{HttpTransport, NotificationTransport, RemoteSink, TransportAck, NOTIFICATIONS_PATH};

/// Sink delivery errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to get destination: {0}")]
    DestinationNotFound(String),

    #[error("Failed to send notification to {destination}: {message}")]
    Transport { destination: String, message: String },

    #[error("Destination {destination} rejected notification with HTTP {status}: {body}")]
    Rejected {
        destination: String,
        status: u16,
        body: String,
    },
}

impl SinkError {
    /// Short label used for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            SinkError::DestinationNotFound(_) => "destination_not_found",
            SinkError::Transport { .. } => "transport",
            SinkError::Rejected { .. } => "rejected",
        }
    }
}

/// What a sink did with a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "sink", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// Logged locally
    Logged { registry: RegistryCheck },
    /// Accepted by the remote service
    Sent { destination: String, status: u16 },
}

/// Consumer of built notifications
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sink name for logs and metrics
    fn name(&self) -> &'static str;

    async fn deliver(&self, notification: &Notification) -> Result<DeliveryOutcome, SinkError>;
}

/// Create the sink selected by `kind` in the notification settings.
///
/// - `"remote"`: a `RemoteSink` for the configured destination
/// - `"console"` (default): a `ConsoleSink` over the registry
pub fn create_sink(
    config: &NotificationsConfig,
    registry: Arc<NotificationTypeRegistry>,
    resolver: Arc<dyn DestinationResolver>,
) -> Arc<dyn NotificationSink> {
    match config.kind.as_str() {
        "remote" => {
            tracing::info!(
                sink = "remote",
                destination = %config.destination,
                "Creating remote notification sink"
            );
            let transport = Arc::new(HttpTransport::new(config.request_timeout()));
            Arc::new(
                RemoteSink::new(config.destination.clone(), resolver, transport)
                    .with_registry(registry),
            )
        }
        "console" => {
            tracing::info!(sink = "console", "Creating console notification sink");
            Arc::new(ConsoleSink::new(registry))
        }
        other => {
            tracing::warn!(
                kind = %other,
                "Unknown notification sink kind, falling back to console"
            );
            Arc::new(ConsoleSink::new(registry))
        }
    }
}

/// Warn about notifications whose type or version is not registered
pub(crate) fn warn_on_registry_mismatch(
    registry: &NotificationTypeRegistry,
    notification: &Notification,
) -> RegistryCheck {
    let check = registry.check(notification);
    match check {
        RegistryCheck::UnknownType => {
            tracing::warn!(
                "Notification Type {} is not in the notification types file",
                notification.type_key()
            );
        }
        RegistryCheck::UnknownVersion => {
            let version = notification.type_version();
            tracing::warn!(
                "Notification Type Version {} for type {} is not in the notification types file",
                version.as_deref().unwrap_or("<missing>"),
                notification.type_key()
            );
        }
        RegistryCheck::Registered => {}
    }
    crate::metrics::NotificationMetrics::record_registry_check(check);
    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::StaticDestinationResolver;

    fn config(kind: &str) -> NotificationsConfig {
        NotificationsConfig {
            kind: kind.to_string(),
            ..NotificationsConfig::default()
        }
    }

    #[test]
    fn test_create_sink_by_kind() {
        let registry = Arc::new(NotificationTypeRegistry::empty());
        let resolver: Arc<dyn DestinationResolver> = Arc::new(StaticDestinationResolver::default());

        assert_eq!(
            create_sink(&config("console"), registry.clone(), resolver.clone()).name(),
            "console"
        );
        assert_eq!(
            create_sink(&config("remote"), registry.clone(), resolver.clone()).name(),
            "remote"
        );
        assert_eq!(create_sink(&config("carrier-pigeon"), registry, resolver).name(), "console");
    }
}
