// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identifiers::DeliveryId;

/// A notification, as surfaced to the host application.
///
/// Derived from the APNs payload shape
/// `{ aps: { alert: {title, body} | string }, data: { type?, delivery_id?, ... } }`.
/// The `type` and `delivery_id` keys are extracted from the `data` object;
/// the remaining keys are passed through in [`Self::data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub title: String,
    pub body: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_id: Option<DeliveryId>,
    pub data: Map<String, Value>,
}

impl NotificationEvent {
    /// Parses a notification payload.
    ///
    /// Total: any JSON value is accepted; fields that are missing or have an
    /// unexpected shape are left empty. A plain-string `alert` becomes the
    /// body with an empty title.
    pub fn from_payload(payload: &Value) -> Self {
        let mut title = String::new();
        let mut body = String::new();

        match payload.get("aps").and_then(|aps| aps.get("alert")) {
            Some(Value::Object(alert)) => {
                title = alert
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned();
                body = alert
                    .get("body")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned();
            }
            Some(Value::String(alert)) => {
                body = alert.clone();
            }
            _ => {}
        }

        let mut data = match payload.get("data") {
            Some(Value::Object(data)) => data.clone(),
            _ => Map::new(),
        };
        // `type` and `delivery_id` are consumed by the client; they are
        // removed from the data surfaced to the host even when malformed.
        let event_type = match data.remove("type") {
            Some(Value::String(event_type)) => Some(event_type),
            _ => None,
        };
        let delivery_id = match data.remove("delivery_id") {
            Some(Value::String(delivery_id)) => Some(DeliveryId::new(delivery_id)),
            _ => None,
        };

        Self {
            title,
            body,
            event_type,
            delivery_id,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn full_payload() {
        let payload = json!({
            "aps": { "alert": { "title": "Hi", "body": "there" } },
            "data": {
                "type": "new_message",
                "delivery_id": "d1",
                "groups": { "id": "g1" },
            },
        });

        let event = NotificationEvent::from_payload(&payload);

        assert_eq!(event.title, "Hi");
        assert_eq!(event.body, "there");
        assert_eq!(event.event_type.as_deref(), Some("new_message"));
        assert_eq!(event.delivery_id, Some(DeliveryId::new("d1")));
        assert_eq!(
            serde_json::to_value(&event.data).unwrap(),
            json!({ "groups": { "id": "g1" } })
        );
    }

    #[test]
    fn string_alert_becomes_body() {
        let payload = json!({ "aps": { "alert": "plain text" } });
        let event = NotificationEvent::from_payload(&payload);
        assert_eq!(event.title, "");
        assert_eq!(event.body, "plain text");
    }

    #[test]
    fn missing_aps_and_data() {
        let event = NotificationEvent::from_payload(&json!({}));
        assert_eq!(event.title, "");
        assert_eq!(event.body, "");
        assert_eq!(event.event_type, None);
        assert_eq!(event.delivery_id, None);
        assert!(event.data.is_empty());
    }

    #[test]
    fn extraction_is_total_for_non_object_payloads() {
        for payload in [json!(null), json!(42), json!("string"), json!([1, 2])] {
            let event = NotificationEvent::from_payload(&payload);
            assert_eq!(event.title, "");
            assert_eq!(event.body, "");
            assert!(event.data.is_empty());
        }
    }

    #[test]
    fn non_string_type_is_removed_but_not_extracted() {
        let payload = json!({
            "data": { "type": 7, "delivery_id": ["d1"], "key": "value" },
        });
        let event = NotificationEvent::from_payload(&payload);
        assert_eq!(event.event_type, None);
        assert_eq!(event.delivery_id, None);
        assert_eq!(
            serde_json::to_value(&event.data).unwrap(),
            json!({ "key": "value" })
        );
    }

    #[test]
    fn alert_with_missing_fields() {
        let payload = json!({ "aps": { "alert": { "title": "only title" } } });
        let event = NotificationEvent::from_payload(&payload);
        assert_eq!(event.title, "only title");
        assert_eq!(event.body, "");
    }
}
