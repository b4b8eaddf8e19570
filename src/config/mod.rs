mod settings;

pub use settings::{LoggingConfig, NotificationsConfig, ServerConfig, Settings};
