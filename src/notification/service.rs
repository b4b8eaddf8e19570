use std::sync::Arc;

use serde_json::Value;

use crate::metrics::NotificationMetrics;
use crate::sink::{DeliveryOutcome, NotificationSink, SinkError};

use super::builder::build_notification;
use super::namespace::TypeKeyNamespace;
use super::types::Notification;

/// Result of a `notify` call that produced a notification
#[derive(Debug, Clone)]
pub struct Notified {
    pub notification: Notification,
    pub outcome: DeliveryOutcome,
}

/// Entry point tying the builder to a sink
pub struct NotificationService {
    namespace: TypeKeyNamespace,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationService {
    pub fn new(namespace: TypeKeyNamespace, sink: Arc<dyn NotificationSink>) -> Self {
        Self { namespace, sink }
    }

    pub fn namespace(&self) -> &TypeKeyNamespace {
        &self.namespace
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    /// Build a notification from `input` and hand it to the sink.
    ///
    /// Returns `Ok(None)` when the input is rejected by validation; sink
    /// failures are returned as errors.
    #[tracing::instrument(name = "notification.notify", skip(self, input), fields(sink = self.sink.name()))]
    pub async fn notify(&self, input: Option<&Value>) -> Result<Option<Notified>, SinkError> {
        let Some(notification) = build_notification(input, &self.namespace) else {
            return Ok(None);
        };

        match self.sink.deliver(&notification).await {
            Ok(outcome) => {
                NotificationMetrics::record_delivered(self.sink.name());
                Ok(Some(Notified {
                    notification,
                    outcome,
                }))
            }
            Err(e) => {
                NotificationMetrics::record_dispatch_failed(e.reason());
                tracing::error!(
                    error = %e,
                    type_key = %notification.type_key(),
                    "Notification delivery failed"
                );
                Err(e)
            }
        }
    }
}
