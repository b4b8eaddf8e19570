use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::destination::{Destination, DEFAULT_DESTINATION_NAME};
use crate::notification::TypeKeyNamespace;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Named remote destinations
    #[serde(default)]
    pub destinations: HashMap<String, Destination>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Key required in `X-API-Key` for `/api/v1` routes (optional)
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    /// Sink kind: "console" or "remote"
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Destination used by the remote sink
    #[serde(default = "default_destination")]
    pub destination: String,
    /// Type key prefix; defaults to the project root directory name
    #[serde(default)]
    pub prefix: Option<String>,
    /// Project root; defaults to the working directory
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    /// Notification types file, relative to the project root
    #[serde(default = "default_types_file")]
    pub types_file: PathBuf,
    /// Remote request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_kind() -> String {
    "console".to_string()
}

fn default_destination() -> String {
    DEFAULT_DESTINATION_NAME.to_string()
}

fn default_types_file() -> PathBuf {
    PathBuf::from("notification-types.json")
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("notifications.kind", default_kind())?
            .set_default("notifications.destination", default_destination())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // GATEWAY__SERVER__PORT, GATEWAY__NOTIFICATIONS__PREFIX, ...
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl NotificationsConfig {
    /// Configured project root, or the working directory
    pub fn project_root(&self) -> PathBuf {
        self.project_root
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn namespace(&self) -> TypeKeyNamespace {
        TypeKeyNamespace::resolve(self.prefix.as_deref(), &self.project_root())
    }

    /// Types file path, resolved against the project root when relative
    pub fn types_file_path(&self) -> PathBuf {
        if self.types_file.is_absolute() {
            self.types_file.clone()
        } else {
            self.project_root().join(&self.types_file)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: None,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            destination: default_destination(),
            prefix: None,
            project_root: None,
            types_file: default_types_file(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}
