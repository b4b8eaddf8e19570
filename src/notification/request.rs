//! Caller-facing notification shapes and their validation

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{CustomPayload, InvalidPriority, Navigation, Priority, Property, TYPE_KEY_FIELD};

/// Reasons a notification request is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("An object must be passed to notify function.")]
    NoObject,

    #[error("Empty object is passed a single parameter to notify function.")]
    EmptyObject,

    #[error("Recipients and title are mandatory parameters.")]
    MissingDefaultParameters,

    #[error("Recipients are mandatory parameters.")]
    MissingCustomParameters,

    #[error("Recipients is not an array or it is empty.")]
    RecipientsNotArray,

    #[error("Recipient ids must be strings.")]
    RecipientIdNotString,

    #[error("Title is not a string.")]
    TitleNotString,

    #[error("Description is not a string.")]
    DescriptionNotString,

    #[error("Type is not a string.")]
    TypeNotString,

    #[error("Type must not be empty.")]
    EmptyType,

    #[error(transparent)]
    InvalidPriority(#[from] InvalidPriority),

    #[error("Properties is not an object.")]
    PropertiesNotArray,

    #[error("Property entry is malformed: {0}")]
    InvalidProperty(String),

    #[error("Navigation is not an object.")]
    NavigationNotObject,

    #[error("Navigation is malformed: {0}")]
    InvalidNavigation(String),

    #[error("Payload is not an object.")]
    PayloadNotObject,

    #[error("Payload is malformed: {0}")]
    InvalidPayload(String),

    #[error("Notification is malformed: {0}")]
    MalformedNotification(String),
}

/// Simple notification carrying a title and an optional description
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultNotification {
    pub recipients: Vec<String>,
    pub title: String,
    pub priority: Option<Priority>,
    pub description: Option<String>,
}

/// Notification of a project-specific type
#[derive(Debug, Clone, PartialEq)]
pub struct CustomNotification {
    /// Un-prefixed type key
    pub type_key: String,
    pub recipients: Vec<String>,
    pub properties: Option<Vec<Property>>,
    pub navigation: Option<Navigation>,
    pub priority: Option<Priority>,
    pub payload: Option<CustomPayload>,
}

/// A validated notification request in one of the three accepted shapes
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationRequest {
    /// Already in wire shape and not validated; only the type key gets namespaced
    Passthrough(Map<String, Value>),
    Default(DefaultNotification),
    Custom(CustomNotification),
}

impl NotificationRequest {
    pub fn from_passthrough(fields: Map<String, Value>) -> Result<Self, ValidationError> {
        if supplied(&fields, TYPE_KEY_FIELD).is_none() {
            return Err(ValidationError::MalformedNotification(format!(
                "{} must be supplied",
                TYPE_KEY_FIELD
            )));
        }
        Ok(Self::Passthrough(fields))
    }

    pub fn from_default(
        recipients: Vec<String>,
        title: impl Into<String>,
        priority: Option<Priority>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.is_empty() {
            return Err(ValidationError::MissingDefaultParameters);
        }
        if recipients.is_empty() {
            return Err(ValidationError::RecipientsNotArray);
        }
        Ok(Self::Default(DefaultNotification {
            recipients,
            title,
            priority,
            description,
        }))
    }

    pub fn from_custom(
        type_key: impl Into<String>,
        recipients: Vec<String>,
        properties: Option<Vec<Property>>,
        navigation: Option<Navigation>,
        priority: Option<Priority>,
        payload: Option<CustomPayload>,
    ) -> Result<Self, ValidationError> {
        let type_key = type_key.into();
        if type_key.is_empty() {
            return Err(ValidationError::EmptyType);
        }
        if recipients.is_empty() {
            return Err(ValidationError::RecipientsNotArray);
        }
        Ok(Self::Custom(CustomNotification {
            type_key,
            recipients,
            properties,
            navigation,
            priority,
            payload,
        }))
    }

    /// Classify a raw JSON argument and validate it.
    ///
    /// A truthy `type` selects the custom shape, a truthy `NotificationTypeKey`
    /// the passthrough shape, anything else the default shape.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let Value::Object(fields) = value else {
            return Err(ValidationError::NoObject);
        };
        if fields.is_empty() {
            return Err(ValidationError::EmptyObject);
        }

        if let Some(type_value) = supplied(fields, "type") {
            custom_from_fields(type_value, fields)
        } else if supplied(fields, TYPE_KEY_FIELD).is_some() {
            Self::from_passthrough(fields.clone())
        } else {
            default_from_fields(fields)
        }
    }

    /// Short name of the shape, used for logs and metrics
    pub fn shape(&self) -> &'static str {
        match self {
            NotificationRequest::Passthrough(_) => "passthrough",
            NotificationRequest::Default(_) => "default",
            NotificationRequest::Custom(_) => "custom",
        }
    }
}

fn custom_from_fields(
    type_value: &Value,
    fields: &Map<String, Value>,
) -> Result<NotificationRequest, ValidationError> {
    let recipients = supplied(fields, "recipients").ok_or(ValidationError::MissingCustomParameters)?;
    let recipients = recipient_ids(recipients)?;
    let type_key = type_value.as_str().ok_or(ValidationError::TypeNotString)?;
    let priority = parse_priority(fields.get("priority"))?;

    let properties = supplied(fields, "properties")
        .map(|value| {
            let entries = value.as_array().ok_or(ValidationError::PropertiesNotArray)?;
            entries
                .iter()
                .map(|entry| {
                    Property::deserialize(entry)
                        .map_err(|e| ValidationError::InvalidProperty(e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let navigation = supplied(fields, "navigation")
        .map(|value| {
            if !value.is_object() {
                return Err(ValidationError::NavigationNotObject);
            }
            Navigation::deserialize(value)
                .map_err(|e| ValidationError::InvalidNavigation(e.to_string()))
        })
        .transpose()?;

    let payload = supplied(fields, "payload")
        .map(|value| {
            if !value.is_object() {
                return Err(ValidationError::PayloadNotObject);
            }
            CustomPayload::deserialize(value)
                .map_err(|e| ValidationError::InvalidPayload(e.to_string()))
        })
        .transpose()?;

    NotificationRequest::from_custom(type_key, recipients, properties, navigation, priority, payload)
}

fn default_from_fields(fields: &Map<String, Value>) -> Result<NotificationRequest, ValidationError> {
    let (Some(recipients), Some(title)) = (supplied(fields, "recipients"), supplied(fields, "title"))
    else {
        return Err(ValidationError::MissingDefaultParameters);
    };

    let recipients = recipient_ids(recipients)?;
    let title = title.as_str().ok_or(ValidationError::TitleNotString)?;
    let priority = parse_priority(fields.get("priority"))?;
    let description = supplied(fields, "description")
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or(ValidationError::DescriptionNotString)
        })
        .transpose()?;

    NotificationRequest::from_default(recipients, title, priority, description)
}

/// Missing, `null`, `false`, `0` and `""` all count as not supplied
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn supplied<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| is_truthy(value))
}

fn recipient_ids(value: &Value) -> Result<Vec<String>, ValidationError> {
    let entries = value
        .as_array()
        .filter(|entries| !entries.is_empty())
        .ok_or(ValidationError::RecipientsNotArray)?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or(ValidationError::RecipientIdNotString)
        })
        .collect()
}

fn parse_priority(value: Option<&Value>) -> Result<Option<Priority>, ValidationError> {
    match value {
        Some(value) if is_truthy(value) => match value.as_str() {
            Some(raw) => Ok(Some(raw.parse()?)),
            None => Err(InvalidPriority(value.to_string()).into()),
        },
        _ => Ok(None),
    }
}
