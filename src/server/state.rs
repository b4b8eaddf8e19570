use std::sync::Arc;

use crate::config::Settings;
use crate::destination::{DestinationResolver, StaticDestinationResolver};
use crate::error::Result;
use crate::metrics::NotificationMetrics;
use crate::notification::NotificationService;
use crate::registry::NotificationTypeRegistry;
use crate::sink::create_sink;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub registry: Arc<NotificationTypeRegistry>,
    pub service: Arc<NotificationService>,
}

impl AppState {
    /// Load the types registry and wire the configured sink.
    ///
    /// Fails when the types file exists but cannot be read or parsed.
    pub fn new(settings: Settings) -> Result<Self> {
        let notifications = &settings.notifications;
        let namespace = notifications.namespace();
        tracing::info!(prefix = %namespace.prefix(), "Type key namespace resolved");

        let registry = Arc::new(NotificationTypeRegistry::load(
            &notifications.types_file_path(),
            &namespace,
        )?);

        let resolver: Arc<dyn DestinationResolver> = Arc::new(StaticDestinationResolver::new(
            settings.destinations.clone(),
        ));
        let sink = create_sink(notifications, registry.clone(), resolver);
        let service = NotificationService::new(namespace, sink);

        Ok(Self::with_components(settings, registry, service))
    }

    /// Assemble state from pre-built parts
    pub fn with_components(
        settings: Settings,
        registry: Arc<NotificationTypeRegistry>,
        service: NotificationService,
    ) -> Self {
        NotificationMetrics::set_registered_types(registry.len());

        Self {
            settings: Arc::new(settings),
            registry,
            service: Arc::new(service),
        }
    }
}
