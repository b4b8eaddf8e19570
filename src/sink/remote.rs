use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::destination::{Destination, DestinationResolver};
use crate::metrics::NotificationMetrics;
use crate::notification::Notification;
use crate::registry::NotificationTypeRegistry;

use super::{warn_on_registry_mismatch, DeliveryOutcome, NotificationSink, SinkError};

/// Path of the notifications collection on the remote service
pub const NOTIFICATIONS_PATH: &str = "v2/Notification.svc/Notifications";

/// Acknowledgement from the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportAck {
    pub status: u16,
}

/// Sends a notification to a resolved destination
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn send(
        &self,
        notification: &Notification,
        destination: &Destination,
    ) -> Result<TransportAck, SinkError>;
}

/// JSON-over-HTTP transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self { client }
    }
}

#[async_trait]
impl NotificationTransport for HttpTransport {
    async fn send(
        &self,
        notification: &Notification,
        destination: &Destination,
    ) -> Result<TransportAck, SinkError> {
        let url = destination.endpoint(NOTIFICATIONS_PATH);

        let mut request = self.client.post(&url).json(notification);
        if let Some(ref token) = destination.token {
            request = request.bearer_auth(token);
        }
        for (key, value) in &destination.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "Request timed out".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                format!("Request failed: {}", e)
            };
            SinkError::Transport {
                destination: destination.name.clone(),
                message,
            }
        })?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            Ok(TransportAck { status })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SinkError::Rejected {
                destination: destination.name.clone(),
                status,
                body,
            })
        }
    }
}

/// Sink that forwards notifications to the remote notification service
pub struct RemoteSink {
    destination_name: String,
    resolver: Arc<dyn DestinationResolver>,
    transport: Arc<dyn NotificationTransport>,
    registry: Option<Arc<NotificationTypeRegistry>>,
}

impl RemoteSink {
    pub fn new(
        destination_name: impl Into<String>,
        resolver: Arc<dyn DestinationResolver>,
        transport: Arc<dyn NotificationTransport>,
    ) -> Self {
        Self {
            destination_name: destination_name.into(),
            resolver,
            transport,
            registry: None,
        }
    }

    /// Warn about unregistered types before sending; never blocks delivery
    pub fn with_registry(mut self, registry: Arc<NotificationTypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }
}

#[async_trait]
impl NotificationSink for RemoteSink {
    fn name(&self) -> &'static str {
        "remote"
    }

    #[tracing::instrument(
        name = "remote_sink.deliver",
        skip(self, notification),
        fields(
            destination = %self.destination_name,
            type_key = %notification.type_key()
        )
    )]
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryOutcome, SinkError> {
        let destination = self
            .resolver
            .resolve(&self.destination_name)
            .await
            .ok_or_else(|| SinkError::DestinationNotFound(self.destination_name.clone()))?;

        if let Some(ref registry) = self.registry {
            if !registry.is_empty() {
                warn_on_registry_mismatch(registry, notification);
            }
        }

        let started = Instant::now();
        let ack = self.transport.send(notification, &destination).await?;
        NotificationMetrics::record_dispatch_latency(started.elapsed());

        tracing::info!(
            destination = %destination.name,
            status = ack.status,
            recipients = notification.recipient_count(),
            "Notification sent"
        );

        Ok(DeliveryOutcome::Sent {
            destination: destination.name,
            status: ack.status,
        })
    }
}
