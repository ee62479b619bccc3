//! SOS alert request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/sos`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSosRequest {
    /// The user raising the alert.
    #[validate(length(min = 1))]
    pub user_id: String,
    /// Sender latitude in degrees.
    pub latitude: f64,
    /// Sender longitude in degrees.
    pub longitude: f64,
    /// Optional free-text message. Truncated to the notification body
    /// limit before storage.
    pub message: Option<String>,
}

/// Request body for `POST /v1/sos/{alertId}/status`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSosStatusRequest {
    /// The caller. Must be the alert's sender.
    #[validate(length(min = 1))]
    pub user_id: String,
    /// Target status: `pending`, `active`, `resolved`, or `false_alarm`.
    pub status: models::AlertStatus,
}

/// Query parameters for `GET /v1/sos`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListSosQuery {
    /// The user whose alert history to list.
    pub user_id: String,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// One SOS alert row.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SosAlertResponse {
    /// Unique alert ID (nanoid, 21 chars).
    pub alert_id: String,
    /// The user who raised the alert.
    pub sender_id: String,
    /// Circle attached at creation time, when the sender had one active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle_id: Option<String>,
    /// Stored message, already bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Lifecycle status (`pending`, `active`, `resolved`, `false_alarm`).
    pub status: models::AlertStatus,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    /// Set while the alert is in `resolved`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<models::SosAlert> for SosAlertResponse {
    fn from(alert: models::SosAlert) -> Self {
        Self {
            alert_id: alert.id,
            sender_id: alert.sender_id,
            circle_id: alert.circle_id,
            message: alert.message,
            latitude: alert.latitude,
            longitude: alert.longitude,
            status: alert.status,
            created_at: alert.created_at,
            resolved_at: alert.resolved_at,
        }
    }
}

/// One notification write that failed during fan-out.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchFailureResponse {
    pub recipient_id: String,
    /// The channel that failed (`sos_friend`, `sos_circle`, `sos_resolved`).
    pub kind: models::NotificationKind,
    pub error: String,
}

/// Fan-out summary attached to alert creation and resolution responses.
///
/// A non-empty `failed` list does not make the request an error; the alert
/// itself is already stored.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReportResponse {
    /// Notifications written successfully.
    pub delivered: u32,
    /// Recipients that could not be notified.
    pub failed: Vec<DispatchFailureResponse>,
}

impl From<models::DispatchReport> for DispatchReportResponse {
    fn from(report: models::DispatchReport) -> Self {
        Self {
            delivered: report.delivered,
            failed: report
                .failed
                .into_iter()
                .map(|failure| DispatchFailureResponse {
                    recipient_id: failure.recipient_id,
                    kind: failure.kind,
                    error: failure.error,
                })
                .collect(),
        }
    }
}

/// Response for `POST /v1/sos`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSosResponse {
    pub alert: SosAlertResponse,
    pub dispatch: DispatchReportResponse,
}

/// Response for `POST /v1/sos/{alertId}/status`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSosStatusResponse {
    pub alert: SosAlertResponse,
    /// Present only when the transition freshly resolved the alert and a
    /// resolution fan-out ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<DispatchReportResponse>,
}

/// Response for `GET /v1/sos`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListSosResponse {
    pub alerts: Vec<SosAlertResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DispatchReport, NotificationKind, SosAlert};

    #[test]
    fn sos_alert_response_from_domain() {
        let mut alert = SosAlert::new("a1".to_string(), "u1".to_string(), 10.0, 20.0);
        alert.message = Some("help".to_string());
        let resp = SosAlertResponse::from(alert);
        assert_eq!(resp.alert_id, "a1");
        assert_eq!(resp.sender_id, "u1");
        assert_eq!(resp.status, models::AlertStatus::Active);
        assert!(resp.resolved_at.is_none());
    }

    #[test]
    fn sos_alert_response_serializes_camel_case() {
        let alert = SosAlert::new("a1".to_string(), "u1".to_string(), 10.0, 20.0);
        let json = serde_json::to_value(SosAlertResponse::from(alert)).expect("serialize");
        assert_eq!(json["alertId"], "a1");
        assert_eq!(json["senderId"], "u1");
        assert!(json.get("circleId").is_none());
        assert!(json.get("resolvedAt").is_none());
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn dispatch_report_response_keeps_failures() {
        let mut report = DispatchReport::new();
        report.record_delivered();
        report.record_failure("u2".into(), NotificationKind::SosCircle, "closed".into());

        let resp = DispatchReportResponse::from(report);
        assert_eq!(resp.delivered, 1);
        assert_eq!(resp.failed.len(), 1);
        assert_eq!(resp.failed[0].recipient_id, "u2");

        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["failed"][0]["kind"], "sos_circle");
    }

    #[test]
    fn update_status_request_parses_false_alarm() {
        let req: UpdateSosStatusRequest =
            serde_json::from_str(r#"{"userId": "u1", "status": "false_alarm"}"#)
                .expect("deserialize");
        assert_eq!(req.status, models::AlertStatus::FalseAlarm);
    }
}
