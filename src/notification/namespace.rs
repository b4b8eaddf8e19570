//! Namespacing of notification type keys per hosting project

use std::path::Path;

use serde_json::Value;

/// Prefix applied to notification type keys
///
/// The prefix is the configured value when present, otherwise the name of
/// the project's root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeKeyNamespace {
    prefix: String,
}

impl TypeKeyNamespace {
    /// Create a namespace with an explicit prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Resolve the prefix from configuration, falling back to the root directory name
    pub fn resolve(configured: Option<&str>, project_root: &Path) -> Self {
        match configured {
            Some(prefix) => Self::new(prefix),
            None => {
                let dir_name = project_root
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if dir_name.is_empty() {
                    tracing::warn!(
                        root = %project_root.display(),
                        "Project root has no directory name, type keys get an empty prefix"
                    );
                }
                Self::new(dir_name)
            }
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `prefix/key`
    pub fn qualify(&self, type_key: &str) -> String {
        format!("{}/{}", self.prefix, type_key)
    }

    /// Qualify a type key taken from raw JSON; non-string keys use their JSON text
    pub fn qualify_value(&self, type_key: &Value) -> String {
        match type_key {
            Value::String(key) => self.qualify(key),
            other => self.qualify(&other.to_string()),
        }
    }
}
