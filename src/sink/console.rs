use std::sync::Arc;

use async_trait::async_trait;

use crate::notification::Notification;
use crate::registry::NotificationTypeRegistry;

use super::{warn_on_registry_mismatch, DeliveryOutcome, NotificationSink, SinkError};

/// Development sink that only logs notifications
pub struct ConsoleSink {
    registry: Arc<NotificationTypeRegistry>,
}

impl ConsoleSink {
    pub fn new(registry: Arc<NotificationTypeRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl NotificationSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn deliver(&self, notification: &Notification) -> Result<DeliveryOutcome, SinkError> {
        tracing::info!(
            "SAP Alert Notification Service notification: {}",
            notification.to_pretty_json()
        );

        // An unknown type skips the version check; an unknown version only warns.
        let registry = warn_on_registry_mismatch(&self.registry, notification);

        Ok(DeliveryOutcome::Logged { registry })
    }
}
