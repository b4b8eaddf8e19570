use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type key used for notifications built from the default shape
pub const DEFAULT_TYPE_KEY: &str = "Default";

/// Version assumed when a caller does not supply one
pub const DEFAULT_TYPE_VERSION: &str = "1";

pub(crate) const TYPE_KEY_FIELD: &str = "NotificationTypeKey";
pub(crate) const TYPE_VERSION_FIELD: &str = "NotificationTypeVersion";
const RECIPIENTS_FIELD: &str = "Recipients";

/// Notification record built from the default or custom shape.
///
/// Field names follow the wire schema of the notification service, so the
/// record serializes with PascalCase keys. Optional fields are omitted from
/// the JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_type_id: Option<String>,
    /// Namespaced type key (`prefix/key`), or `Default` for simple notifications
    pub notification_type_key: String,
    pub notification_type_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_target_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_target_object: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_display_text: Option<String>,
    #[serde(rename = "ActorImageURL", skip_serializing_if = "Option::is_none")]
    pub actor_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_type_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
    pub recipients: Vec<Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_parameters: Option<Vec<TargetParameter>>,
}

impl NotificationRecord {
    /// Create a record with the mandatory fields set and everything else absent
    pub fn new(type_key: impl Into<String>, recipients: Vec<Recipient>) -> Self {
        Self {
            id: None,
            origin_id: None,
            notification_type_id: None,
            notification_type_key: type_key.into(),
            notification_type_version: DEFAULT_TYPE_VERSION.to_string(),
            navigation_target_action: None,
            navigation_target_object: None,
            priority: Priority::default(),
            provider_id: None,
            actor_id: None,
            actor_display_text: None,
            actor_image_url: None,
            notification_type_timestamp: None,
            properties: None,
            recipients,
            target_parameters: None,
        }
    }
}

/// A notification ready for delivery, as handed to every sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Notification {
    /// Built from the default or custom shape
    Record(NotificationRecord),
    /// Caller-supplied wire record; only `NotificationTypeKey` was rewritten
    Passthrough(Map<String, Value>),
}

impl Notification {
    /// Namespaced type key
    pub fn type_key(&self) -> &str {
        match self {
            Notification::Record(record) => record.notification_type_key.as_str(),
            Notification::Passthrough(fields) => fields
                .get(TYPE_KEY_FIELD)
                .and_then(Value::as_str)
                .unwrap_or_default(),
        }
    }

    /// Type version. A passthrough record may not carry one.
    pub fn type_version(&self) -> Option<Cow<'_, str>> {
        match self {
            Notification::Record(record) => {
                Some(Cow::Borrowed(record.notification_type_version.as_str()))
            }
            Notification::Passthrough(fields) => match fields.get(TYPE_VERSION_FIELD)? {
                Value::String(version) => Some(Cow::Borrowed(version.as_str())),
                Value::Number(version) => Some(Cow::Owned(version.to_string())),
                _ => None,
            },
        }
    }

    pub fn recipient_count(&self) -> usize {
        match self {
            Notification::Record(record) => record.recipients.len(),
            Notification::Passthrough(fields) => fields
                .get(RECIPIENTS_FIELD)
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
        }
    }

    /// The typed record, unless this is a passthrough
    pub fn as_record(&self) -> Option<&NotificationRecord> {
        match self {
            Notification::Record(record) => Some(record),
            Notification::Passthrough(_) => None,
        }
    }

    /// Render as indented JSON for log output
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

impl From<NotificationRecord> for Notification {
    fn from(record: NotificationRecord) -> Self {
        Notification::Record(record)
    }
}

/// A single property of a notification.
///
/// Custom notifications pass their properties through unchanged, so
/// `Value` takes any JSON value and unknown keys are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Property {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sensitive: Option<bool>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl Property {
    /// Non-sensitive English string property
    pub fn english_string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            language: Some("en".to_string()),
            value: Some(Value::String(value.into())),
            r#type: Some("String".to_string()),
            is_sensitive: Some(false),
            extensions: Map::new(),
        }
    }
}

/// Addressee of a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recipient {
    pub recipient_id: String,
}

impl Recipient {
    pub fn new(recipient_id: impl Into<String>) -> Self {
        Self {
            recipient_id: recipient_id.into(),
        }
    }
}

/// Key/value pair appended to the navigation target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetParameter {
    pub key: String,
    pub value: String,
}

/// Navigation target of a custom notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Navigation {
    pub navigation_target_action: Option<String>,
    pub navigation_target_object: Option<String>,
}

/// Optional record fields a custom notification may supply through `payload`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomPayload {
    pub id: Option<String>,
    pub origin_id: Option<String>,
    pub notification_type_id: Option<String>,
    pub notification_type_version: Option<String>,
    pub provider_id: Option<String>,
    pub actor_id: Option<String>,
    pub actor_display_text: Option<String>,
    #[serde(rename = "ActorImageURL")]
    pub actor_image_url: Option<String>,
    pub notification_type_timestamp: Option<String>,
    pub target_parameters: Option<Vec<TargetParameter>>,
}

/// Priority levels understood by the notification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    /// Used when the caller does not specify a priority
    #[default]
    Neutral,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Neutral,
        Priority::Medium,
        Priority::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Neutral => "NEUTRAL",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a priority string is not one of the known levels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid priority {0}. Allowed priorities are LOW, NEUTRAL, MEDIUM, HIGH")]
pub struct InvalidPriority(pub String);

impl FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| InvalidPriority(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_error_message() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid priority urgent. Allowed priorities are LOW, NEUTRAL, MEDIUM, HIGH"
        );
    }

    #[test]
    fn test_record_serializes_wire_keys() {
        let mut record = NotificationRecord::new("app/Foo", vec![Recipient::new("u1")]);
        record.actor_image_url = Some("https://example.com/a.png".to_string());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["NotificationTypeKey"], "app/Foo");
        assert_eq!(value["NotificationTypeVersion"], "1");
        assert_eq!(value["Priority"], "NEUTRAL");
        assert_eq!(value["Recipients"], json!([{"RecipientId": "u1"}]));
        assert_eq!(value["ActorImageURL"], "https://example.com/a.png");
        assert!(value.get("Id").is_none());
        assert!(value.get("Properties").is_none());
        assert!(value.get("TargetParameters").is_none());
    }

    #[test]
    fn test_property_keeps_any_value_and_unknown_keys() {
        let typed: Property =
            serde_json::from_value(json!({"Key": "count", "Value": 5, "Type": "Integer"})).unwrap();
        assert_eq!(typed.value, Some(json!(5)));
        assert_eq!(
            serde_json::to_value(&typed).unwrap(),
            json!({"Key": "count", "Value": 5, "Type": "Integer"})
        );

        let extra: Property =
            serde_json::from_value(json!({"Key": "k", "Value": "v", "Extra": "x"})).unwrap();
        assert_eq!(
            serde_json::to_value(&extra).unwrap(),
            json!({"Key": "k", "Value": "v", "Extra": "x"})
        );
    }

    #[test]
    fn test_passthrough_accessors() {
        let Value::Object(fields) = json!({
            "NotificationTypeKey": "myapp/Bar",
            "NotificationTypeVersion": 2,
            "Recipients": [{"RecipientId": "u1"}, {"RecipientId": "u2"}]
        }) else {
            unreachable!()
        };
        let notification = Notification::Passthrough(fields);

        assert_eq!(notification.type_key(), "myapp/Bar");
        assert_eq!(notification.type_version().as_deref(), Some("2"));
        assert_eq!(notification.recipient_count(), 2);
        assert!(notification.as_record().is_none());

        let Value::Object(bare) = json!({"NotificationTypeKey": "myapp/Bar"}) else {
            unreachable!()
        };
        let bare = Notification::Passthrough(bare);
        assert_eq!(bare.type_version(), None);
        assert_eq!(bare.recipient_count(), 0);
    }

    #[test]
    fn test_record_notification_serializes_as_record() {
        let record = NotificationRecord::new("app/Foo", vec![Recipient::new("u1")]);
        let notification = Notification::from(record.clone());

        assert_eq!(notification.type_version().as_deref(), Some("1"));
        assert_eq!(notification.as_record(), Some(&record));
        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            serde_json::to_value(&record).unwrap()
        );
    }
}
