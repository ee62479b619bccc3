use std::sync::Arc;

use chrono::Utc;
use nanoid::nanoid;

use crate::db::SafetyBackend;
use crate::error::{LanternError, Result};
use crate::geo;
use crate::models::{AlertStatus, DispatchReport, SosAlert};
use crate::services::dispatch::{truncate_message, AlertDispatcher};

/// SOS alert lifecycle: creation with fan-out, status transitions, and the
/// sender's own history.
#[derive(Clone)]
pub struct AlertService {
    db: Arc<dyn SafetyBackend>,
    dispatcher: AlertDispatcher,
    max_message_chars: usize,
}

impl AlertService {
    pub fn new(db: Arc<dyn SafetyBackend>, max_message_chars: usize) -> Self {
        let dispatcher = AlertDispatcher::new(Arc::clone(&db), max_message_chars);
        Self {
            db,
            dispatcher,
            max_message_chars,
        }
    }

    /// Persists the alert first, then fans out. The alert is stamped with
    /// the sender's active circle when one exists; without one the friend
    /// channel still fires. The stored message obeys the same bound as
    /// notification bodies.
    pub async fn create_alert(
        &self,
        sender_id: &str,
        latitude: f64,
        longitude: f64,
        message: Option<&str>,
    ) -> Result<(SosAlert, DispatchReport)> {
        geo::validate_point(latitude, longitude)?;
        self.db
            .get_user(sender_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("User '{sender_id}' not found")))?;

        let active_circle = self.db.get_active_circle_by_owner(sender_id).await?;

        let mut alert = SosAlert::new(nanoid!(), sender_id.to_string(), latitude, longitude);
        alert.circle_id = active_circle.map(|circle| circle.id);
        alert.message = truncate_message(message, self.max_message_chars);
        self.db.create_alert(&alert).await?;

        tracing::info!(
            alert_id = %alert.id,
            sender_id = sender_id,
            circle_id = ?alert.circle_id,
            "SOS alert created"
        );

        let report = self.dispatcher.on_alert_created(&alert).await;
        Ok((alert, report))
    }

    /// Only the sender may move their alert. Entering `resolved` stamps
    /// `resolved_at` and fans a resolution notice out to the sender's
    /// friends; leaving `resolved` clears the stamp.
    pub async fn update_status(
        &self,
        alert_id: &str,
        caller_id: &str,
        new_status: AlertStatus,
    ) -> Result<(SosAlert, Option<DispatchReport>)> {
        let mut alert = self
            .db
            .get_alert(alert_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("Alert '{alert_id}' not found")))?;

        if alert.sender_id != caller_id {
            return Err(LanternError::Forbidden(
                "Only the sender can update an alert".to_string(),
            ));
        }

        let was_resolved = alert.status == AlertStatus::Resolved;
        alert.status = new_status;
        if new_status == AlertStatus::Resolved {
            if alert.resolved_at.is_none() {
                alert.resolved_at = Some(Utc::now());
            }
        } else {
            alert.resolved_at = None;
        }
        self.db.update_alert(&alert).await?;

        let report = if new_status == AlertStatus::Resolved && !was_resolved {
            Some(self.dispatcher.on_alert_resolved(&alert).await)
        } else {
            None
        };

        Ok((alert, report))
    }

    pub async fn alerts_by_sender(&self, user_id: &str) -> Result<Vec<SosAlert>> {
        self.db
            .get_user(user_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("User '{user_id}' not found")))?;

        self.db.get_alerts_by_sender(user_id).await
    }
}
