//! Conversion of validated requests into canonical notification records

use serde_json::Value;

use crate::metrics::NotificationMetrics;

use super::namespace::TypeKeyNamespace;
use super::request::{
    CustomNotification, DefaultNotification, NotificationRequest, ValidationError,
};
use super::types::{
    Notification, NotificationRecord, Property, Recipient, DEFAULT_TYPE_KEY, TYPE_KEY_FIELD,
};

/// Build a notification from a raw `notify` argument.
///
/// Invalid input is logged as a warning and yields `None`; this function
/// never fails on caller input.
pub fn build_notification(
    input: Option<&Value>,
    namespace: &TypeKeyNamespace,
) -> Option<Notification> {
    let request = match input {
        Some(value) => NotificationRequest::from_value(value),
        None => Err(ValidationError::NoObject),
    };

    match request {
        Ok(request) => {
            NotificationMetrics::record_built(request.shape());
            Some(request.into_notification(namespace))
        }
        Err(e) => {
            NotificationMetrics::record_rejected();
            tracing::warn!("{}", e);
            None
        }
    }
}

impl NotificationRequest {
    /// Assemble the notification for this request
    pub fn into_notification(self, namespace: &TypeKeyNamespace) -> Notification {
        match self {
            NotificationRequest::Passthrough(mut fields) => {
                if let Some(key) = fields.get(TYPE_KEY_FIELD) {
                    let qualified = namespace.qualify_value(key);
                    fields.insert(TYPE_KEY_FIELD.to_string(), Value::String(qualified));
                }
                Notification::Passthrough(fields)
            }
            NotificationRequest::Default(default) => default.into_record().into(),
            NotificationRequest::Custom(custom) => custom.into_record(namespace).into(),
        }
    }
}

impl DefaultNotification {
    fn into_record(self) -> NotificationRecord {
        let mut record = NotificationRecord::new(DEFAULT_TYPE_KEY, to_recipients(self.recipients));
        record.priority = self.priority.unwrap_or_default();
        record.properties = Some(vec![
            Property::english_string("title", self.title),
            Property::english_string("description", self.description.unwrap_or_default()),
        ]);
        record
    }
}

impl CustomNotification {
    fn into_record(self, namespace: &TypeKeyNamespace) -> NotificationRecord {
        let mut record = NotificationRecord::new(
            namespace.qualify(&self.type_key),
            to_recipients(self.recipients),
        );
        record.priority = self.priority.unwrap_or_default();

        record.properties = self.properties;

        if let Some(navigation) = self.navigation {
            record.navigation_target_action = navigation.navigation_target_action;
            record.navigation_target_object = navigation.navigation_target_object;
        }

        if let Some(payload) = self.payload {
            if let Some(version) = payload.notification_type_version.filter(|v| !v.is_empty()) {
                record.notification_type_version = version;
            }
            record.id = payload.id;
            record.origin_id = payload.origin_id;
            record.notification_type_id = payload.notification_type_id;
            record.provider_id = payload.provider_id;
            record.actor_id = payload.actor_id;
            record.actor_display_text = payload.actor_display_text;
            record.actor_image_url = payload.actor_image_url;
            record.notification_type_timestamp = payload.notification_type_timestamp;
            record.target_parameters = payload.target_parameters;
        }

        record
    }
}

fn to_recipients(ids: Vec<String>) -> Vec<Recipient> {
    ids.into_iter().map(Recipient::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::types::{Priority, TargetParameter};
    use serde_json::json;

    fn namespace() -> TypeKeyNamespace {
        TypeKeyNamespace::new("myapp")
    }

    fn build_record(input: &Value) -> NotificationRecord {
        match build_notification(Some(input), &namespace()) {
            Some(Notification::Record(record)) => record,
            other => panic!("expected a built record, got {:?}", other),
        }
    }

    #[test]
    fn test_default_notification() {
        let input = json!({
            "recipients": ["alice", "bob", "carol"],
            "title": "Build finished",
            "priority": "medium"
        });

        let record = build_record(&input);

        assert_eq!(record.notification_type_key, "Default");
        assert_eq!(record.notification_type_version, "1");
        assert_eq!(record.priority, Priority::Medium);
        assert_eq!(
            record.recipients,
            vec![Recipient::new("alice"), Recipient::new("bob"), Recipient::new("carol")]
        );
        assert_eq!(
            record.properties,
            Some(vec![
                Property::english_string("title", "Build finished"),
                Property::english_string("description", ""),
            ])
        );
    }

    #[test]
    fn test_default_wire_shape() {
        let input = json!({"recipients": ["u1"], "title": "Hi", "description": "There"});
        let record = build_record(&input);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "NotificationTypeKey": "Default",
                "NotificationTypeVersion": "1",
                "Priority": "NEUTRAL",
                "Properties": [
                    {"Key": "title", "Language": "en", "Value": "Hi", "Type": "String", "IsSensitive": false},
                    {"Key": "description", "Language": "en", "Value": "There", "Type": "String", "IsSensitive": false}
                ],
                "Recipients": [{"RecipientId": "u1"}]
            })
        );
    }

    #[test]
    fn test_custom_notification_is_namespaced() {
        let input = json!({"type": "Foo", "recipients": ["u1"]});
        let record = build_record(&input);

        assert_eq!(record.notification_type_key, "myapp/Foo");
        assert_eq!(record.notification_type_version, "1");
        assert_eq!(record.priority, Priority::Neutral);
        assert_eq!(record.properties, None);
        assert_eq!(record.id, None);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "NotificationTypeKey": "myapp/Foo",
                "NotificationTypeVersion": "1",
                "Priority": "NEUTRAL",
                "Recipients": [{"RecipientId": "u1"}]
            })
        );
    }

    #[test]
    fn test_custom_notification_copies_payload_and_navigation() {
        let input = json!({
            "type": "LeaveRequest",
            "recipients": ["manager"],
            "priority": "HIGH",
            "properties": [
                {"Key": "requester", "Language": "en", "Value": "Jane", "Type": "String", "IsSensitive": false}
            ],
            "navigation": {
                "NavigationTargetAction": "approve",
                "NavigationTargetObject": "LeaveRequest"
            },
            "payload": {
                "Id": "0b7b4a7c",
                "NotificationTypeVersion": "2",
                "ActorId": "jane",
                "ActorDisplayText": "Jane Doe",
                "ActorImageURL": "https://example.com/jane.png",
                "TargetParameters": [{"Key": "RequestId", "Value": "42"}]
            }
        });

        let record = build_record(&input);

        assert_eq!(record.notification_type_key, "myapp/LeaveRequest");
        assert_eq!(record.notification_type_version, "2");
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.navigation_target_action.as_deref(), Some("approve"));
        assert_eq!(record.navigation_target_object.as_deref(), Some("LeaveRequest"));
        assert_eq!(record.id.as_deref(), Some("0b7b4a7c"));
        assert_eq!(record.actor_image_url.as_deref(), Some("https://example.com/jane.png"));
        assert_eq!(record.origin_id, None);
        assert_eq!(
            record.target_parameters,
            Some(vec![TargetParameter {
                key: "RequestId".to_string(),
                value: "42".to_string()
            }])
        );
        let properties = record.properties.unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].value, Some(json!("Jane")));
    }

    #[test]
    fn test_custom_properties_pass_through_unchanged() {
        let properties = json!([
            {"Key": "count", "Value": 5, "Type": "Integer"},
            {"Key": "k", "Value": "v", "Extra": "x"}
        ]);
        let input = json!({"type": "Foo", "recipients": ["u1"], "properties": properties});

        let value = serde_json::to_value(build_record(&input)).unwrap();
        assert_eq!(value["Properties"], properties);
    }

    #[test]
    fn test_custom_empty_version_falls_back() {
        let input = json!({
            "type": "Foo",
            "recipients": ["u1"],
            "payload": {"NotificationTypeVersion": ""}
        });
        assert_eq!(build_record(&input).notification_type_version, "1");
    }

    #[test]
    fn test_bare_type_key_passthrough() {
        let notification =
            build_notification(Some(&json!({"NotificationTypeKey": "Bar"})), &namespace()).unwrap();

        assert_eq!(notification.type_key(), "myapp/Bar");
        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({"NotificationTypeKey": "myapp/Bar"})
        );
    }

    #[test]
    fn test_passthrough_only_prefixes_key() {
        let input = json!({
            "NotificationTypeKey": "Bar",
            "Priority": "low",
            "Id": 42,
            "Recipients": [{"RecipientId": "u1"}],
            "Properties": [{"Key": "k", "Value": 1, "Extra": true}],
            "Vendor": {"nested": [1, 2]}
        });

        let notification = build_notification(Some(&input), &namespace()).unwrap();

        let mut expected = input.clone();
        expected["NotificationTypeKey"] = json!("myapp/Bar");
        assert_eq!(
            serde_json::to_string(&notification).unwrap(),
            serde_json::to_string(&expected).unwrap()
        );
    }

    #[test]
    fn test_missing_and_empty_input_yield_nothing() {
        assert!(build_notification(None, &namespace()).is_none());
        assert!(build_notification(Some(&json!({})), &namespace()).is_none());
        assert!(build_notification(Some(&Value::Null), &namespace()).is_none());
    }

    #[test]
    fn test_building_twice_is_deterministic() {
        let input = json!({
            "type": "Foo",
            "recipients": ["u1", "u2"],
            "payload": {"Id": "x"}
        });
        let first = build_notification(Some(&input), &namespace());
        let second = build_notification(Some(&input), &namespace());
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
