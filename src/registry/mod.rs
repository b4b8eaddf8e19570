//! Notification types registry.
//!
//! A read-only reference list of the notification types (and their
//! versions) a project declares in its types file. It is loaded once at
//! start-up and only used for advisory checks: a record whose type or
//! version is not registered is still considered valid.
//!
//! # File format
//!
//! ```json
//! [
//!   { "NotificationTypeKey": "LeaveRequest", "NotificationTypeVersion": "1", "Templates": [] }
//! ]
//! ```
//!
//! Keys are namespaced with the project prefix on load, so they can be
//! compared directly with built notifications.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::notification::{
    Notification, TypeKeyNamespace, DEFAULT_TYPE_VERSION, TYPE_KEY_FIELD, TYPE_VERSION_FIELD,
};

/// Registry loading errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read notification types file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse notification types file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of looking a notification up in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryCheck {
    Registered,
    UnknownType,
    /// The type is known but not in this version
    UnknownVersion,
}

/// Registered type keys with their versions, for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredType {
    pub key: String,
    pub versions: Vec<String>,
}

/// Type key -> version -> type definition
#[derive(Debug, Clone, Default)]
pub struct NotificationTypeRegistry {
    types: HashMap<String, HashMap<String, Value>>,
}

impl NotificationTypeRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the registry from a types file.
    ///
    /// A missing file yields an empty registry. A file that is not a JSON
    /// array of objects is an error.
    pub fn load(path: &Path, namespace: &TypeKeyNamespace) -> Result<Self, RegistryError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Notification Types file path is incorrect.");
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let types: Vec<Map<String, Value>> =
            serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let registry = Self::from_types(types, namespace);
        tracing::info!(
            path = %path.display(),
            types = registry.len(),
            "Notification types loaded"
        );
        Ok(registry)
    }

    /// Build the registry from already parsed type definitions.
    ///
    /// If any definition lacks `NotificationTypeKey` the whole list is
    /// ignored and the registry is empty.
    pub fn from_types(types: Vec<Map<String, Value>>, namespace: &TypeKeyNamespace) -> Self {
        if !validate_types(&types) {
            tracing::warn!(
                "Notification Types must contain the following key: 'NotificationTypeKey'."
            );
            return Self::empty();
        }

        let mut registry = Self::empty();
        for mut definition in types {
            let Some(key) = definition.get(TYPE_KEY_FIELD).map(|key| namespace.qualify_value(key))
            else {
                continue;
            };
            let version = match definition.get(TYPE_VERSION_FIELD) {
                Some(Value::String(version)) => version.clone(),
                Some(Value::Number(version)) => version.to_string(),
                _ => DEFAULT_TYPE_VERSION.to_string(),
            };

            definition.insert(TYPE_KEY_FIELD.to_string(), Value::String(key.clone()));
            registry
                .types
                .entry(key)
                .or_default()
                .insert(version, Value::Object(definition));
        }
        registry
    }

    pub fn contains_type(&self, type_key: &str) -> bool {
        self.types.contains_key(type_key)
    }

    pub fn contains_version(&self, type_key: &str, version: &str) -> bool {
        self.types
            .get(type_key)
            .is_some_and(|versions| versions.contains_key(version))
    }

    /// Type definition as read from the types file
    pub fn get(&self, type_key: &str, version: &str) -> Option<&Value> {
        self.types.get(type_key)?.get(version)
    }

    /// Look up the notification's type and version.
    ///
    /// A notification without a version is never registered under one.
    pub fn check(&self, notification: &Notification) -> RegistryCheck {
        let Some(versions) = self.types.get(notification.type_key()) else {
            return RegistryCheck::UnknownType;
        };
        match notification.type_version() {
            Some(version) if versions.contains_key(version.as_ref()) => RegistryCheck::Registered,
            _ => RegistryCheck::UnknownVersion,
        }
    }

    /// All registered types, sorted by key with sorted versions
    pub fn registered_types(&self) -> Vec<RegisteredType> {
        let sorted: BTreeMap<&String, &HashMap<String, Value>> = self.types.iter().collect();
        sorted
            .into_iter()
            .map(|(key, versions)| {
                let mut versions: Vec<String> = versions.keys().cloned().collect();
                versions.sort();
                RegisteredType {
                    key: key.clone(),
                    versions,
                }
            })
            .collect()
    }

    /// Number of registered type keys
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Every definition must name its type key
pub fn validate_types(types: &[Map<String, Value>]) -> bool {
    types.iter().all(|definition| definition.contains_key(TYPE_KEY_FIELD))
}
