//! Notification DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models;

/// Query parameters for `GET /v1/notifications`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    /// The recipient whose notifications to list.
    pub user_id: String,
    /// 1-based page. Defaults to 1.
    pub page: Option<u32>,
    /// Page size. Defaults to 20, clamped to `1..=100`.
    pub limit: Option<u32>,
}

/// One stored notification.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Unique notification ID (nanoid, 21 chars).
    pub notification_id: String,
    pub recipient_id: String,
    pub title: String,
    pub message: String,
    /// `sos_friend`, `sos_circle`, or `sos_resolved`.
    pub kind: models::NotificationKind,
    pub is_read: bool,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<models::Notification> for NotificationResponse {
    fn from(notification: models::Notification) -> Self {
        Self {
            notification_id: notification.id,
            recipient_id: notification.recipient_id,
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

/// Response for `GET /v1/notifications`. Pagination lives in the envelope's
/// `meta` field.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsResponse {
    pub notifications: Vec<NotificationResponse>,
}

/// Response for `POST /v1/notifications/{notificationId}/read`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReadResponse {
    pub notification_id: String,
    pub is_read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Notification, NotificationKind};

    #[test]
    fn notification_response_serializes_camel_case() {
        let notification = Notification::new(
            "n1".to_string(),
            "u2".to_string(),
            "SOS from Alice".to_string(),
            "Alice sent an SOS alert.".to_string(),
            NotificationKind::SosFriend,
        );
        let json = serde_json::to_value(NotificationResponse::from(notification))
            .expect("serialize");
        assert_eq!(json["notificationId"], "n1");
        assert_eq!(json["recipientId"], "u2");
        assert_eq!(json["kind"], "sos_friend");
        assert_eq!(json["isRead"], false);
    }

    #[test]
    fn list_query_page_and_limit_optional() {
        let query: ListNotificationsQuery =
            serde_json::from_str(r#"{"userId": "u1"}"#).expect("deserialize");
        assert!(query.page.is_none());
        assert!(query.limit.is_none());
    }
}
