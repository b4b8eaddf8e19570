//! Named remote destinations.
//!
//! A destination is the endpoint configuration of the remote notification
//! service. Destinations are looked up by name through a
//! [`DestinationResolver`]; the default resolver serves them from the
//! `destinations` section of the settings.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

/// Default name of the notification service destination
pub const DEFAULT_DESTINATION_NAME: &str = "SAP_Notifications";

/// Endpoint configuration of a remote notification service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Destination {
    /// Destination name; filled from the map key when read from settings
    #[serde(default)]
    pub name: String,
    /// Base URL of the service
    pub url: String,
    /// Bearer token sent with every request (optional)
    #[serde(default)]
    pub token: Option<String>,
    /// Additional request headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Destination {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            token: None,
            headers: HashMap::new(),
        }
    }

    /// Join a relative path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Looks up destinations by name
#[async_trait]
pub trait DestinationResolver: Send + Sync {
    /// `None` when no destination with that name exists
    async fn resolve(&self, name: &str) -> Option<Destination>;
}

/// Resolver over a fixed set of destinations
#[derive(Debug, Clone, Default)]
pub struct StaticDestinationResolver {
    destinations: HashMap<String, Destination>,
}

impl StaticDestinationResolver {
    pub fn new(destinations: HashMap<String, Destination>) -> Self {
        let destinations = destinations
            .into_iter()
            .map(|(name, mut destination)| {
                destination.name = name.clone();
                (name, destination)
            })
            .collect();
        Self { destinations }
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destinations
            .insert(destination.name.clone(), destination);
        self
    }
}

#[async_trait]
impl DestinationResolver for StaticDestinationResolver {
    async fn resolve(&self, name: &str) -> Option<Destination> {
        // Configuration sources may fold key case
        self.destinations
            .get(name)
            .or_else(|| {
                self.destinations
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, destination)| destination)
            })
            .cloned()
    }
}
