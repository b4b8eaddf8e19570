//! Notification building and the `notify` entry point.
//!
//! Callers pass a single JSON object in one of three shapes:
//!
//! - **custom**: `{ "type": "LeaveRequest", "recipients": [...], "properties": [...],
//!   "navigation": {...}, "priority": "HIGH", "payload": {...} }`
//! - **passthrough**: an already complete record with a `NotificationTypeKey`
//! - **default**: `{ "recipients": [...], "title": "...", "description": "...", "priority": "LOW" }`
//!
//! Default and custom shapes are validated and mapped to a
//! [`NotificationRecord`]. A passthrough record is forwarded as given apart
//! from its type key. Custom and passthrough type keys are namespaced with
//! the project prefix.

mod builder;
mod namespace;
mod request;
mod service;
mod types;

pub use builder::build_notification;
pub use namespace::TypeKeyNamespace;
pub use request::{CustomNotification, DefaultNotification, NotificationRequest, ValidationError};
pub use service::{NotificationService, Notified};
pub use types::{
    CustomPayload, InvalidPriority, Navigation, Notification, NotificationRecord, Priority,
    Property, Recipient, TargetParameter, DEFAULT_TYPE_KEY, DEFAULT_TYPE_VERSION,
};
pub(crate) use types::{TYPE_KEY_FIELD, TYPE_VERSION_FIELD};
