use std::sync::Arc;

use nanoid::nanoid;
use unicode_segmentation::UnicodeSegmentation;

use crate::db::SafetyBackend;
use crate::models::{DispatchReport, Notification, NotificationKind, SosAlert};

/// Bound a message to `max_chars` visible characters. `None` and the
/// empty string pass through untouched; anything longer than the bound
/// keeps the first `max_chars - 1` graphemes and gains a trailing `…`,
/// so the result never exceeds `max_chars`.
pub fn truncate_message(message: Option<&str>, max_chars: usize) -> Option<String> {
    let message = message?;
    if message.is_empty() {
        return Some(String::new());
    }

    let trimmed = message.trim_end();
    let graphemes: Vec<&str> = trimmed.graphemes(true).collect();
    if graphemes.len() <= max_chars {
        return Some(trimmed.to_string());
    }

    let kept: String = graphemes[..max_chars.saturating_sub(1)].concat();
    Some(format!("{}…", kept.trim_end()))
}

/// Fans an SOS alert out to its audience as stored notifications. Each
/// write is independent: one failed recipient never blocks the rest, and
/// the caller gets the full picture in the returned report.
#[derive(Clone)]
pub struct AlertDispatcher {
    db: Arc<dyn SafetyBackend>,
    max_body_chars: usize,
}

impl AlertDispatcher {
    pub fn new(db: Arc<dyn SafetyBackend>, max_body_chars: usize) -> Self {
        Self { db, max_body_chars }
    }

    /// Audience: one `sos_friend` notification per friendship peer of the
    /// sender, plus one `sos_circle` per member of the alert's circle
    /// except the sender. A recipient in both channels gets both.
    pub async fn on_alert_created(&self, alert: &SosAlert) -> DispatchReport {
        let mut report = DispatchReport::new();
        let display_name = self.sender_display_name(&alert.sender_id).await;

        let title = format!("SOS from {display_name}");
        let body = match truncate_message(alert.message.as_deref(), self.max_body_chars) {
            Some(message) if !message.is_empty() => message,
            _ => format!("{display_name} sent an SOS alert."),
        };

        match self.db.get_friends_by_user_id(&alert.sender_id).await {
            Ok(friends) => {
                for friend in friends {
                    if friend.id == alert.sender_id {
                        continue;
                    }
                    self.deliver(&mut report, friend.id, NotificationKind::SosFriend, &title, &body)
                        .await;
                }
            }
            Err(error) => {
                tracing::error!(
                    alert_id = %alert.id,
                    error = %error,
                    "Failed to load friends for SOS fan-out; friend channel skipped"
                );
            }
        }

        if let Some(circle_id) = alert.circle_id.as_deref() {
            match self.db.get_members_by_circle(circle_id).await {
                Ok(members) => {
                    for member in members {
                        if member.member_id == alert.sender_id {
                            continue;
                        }
                        self.deliver(
                            &mut report,
                            member.member_id,
                            NotificationKind::SosCircle,
                            &title,
                            &body,
                        )
                        .await;
                    }
                }
                Err(error) => {
                    tracing::error!(
                        alert_id = %alert.id,
                        circle_id = circle_id,
                        error = %error,
                        "Failed to load circle members for SOS fan-out; circle channel skipped"
                    );
                }
            }
        }

        tracing::info!(
            alert_id = %alert.id,
            delivered = report.delivered,
            failed = report.failed.len(),
            "SOS fan-out finished"
        );
        report
    }

    /// Resolution goes to the friend channel only, once per friend.
    pub async fn on_alert_resolved(&self, alert: &SosAlert) -> DispatchReport {
        let mut report = DispatchReport::new();
        let display_name = self.sender_display_name(&alert.sender_id).await;

        let title = "SOS Alert Resolved".to_string();
        let body = format!("{display_name}'s SOS alert has been resolved.");

        match self.db.get_friends_by_user_id(&alert.sender_id).await {
            Ok(friends) => {
                for friend in friends {
                    if friend.id == alert.sender_id {
                        continue;
                    }
                    self.deliver(
                        &mut report,
                        friend.id,
                        NotificationKind::SosResolved,
                        &title,
                        &body,
                    )
                    .await;
                }
            }
            Err(error) => {
                tracing::error!(
                    alert_id = %alert.id,
                    error = %error,
                    "Failed to load friends for resolve fan-out"
                );
            }
        }

        report
    }

    /// A missing or unreadable profile never aborts a fan-out.
    async fn sender_display_name(&self, sender_id: &str) -> String {
        match self.db.get_user(sender_id).await {
            Ok(Some(user)) => user.display_name,
            Ok(None) => "Unknown User".to_string(),
            Err(error) => {
                tracing::warn!(
                    sender_id = sender_id,
                    error = %error,
                    "Failed to resolve sender profile; using fallback name"
                );
                "Unknown User".to_string()
            }
        }
    }

    async fn deliver(
        &self,
        report: &mut DispatchReport,
        recipient_id: String,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) {
        let notification = Notification::new(
            nanoid!(),
            recipient_id.clone(),
            title.to_string(),
            body.to_string(),
            kind,
        );

        match self.db.create_notification(&notification).await {
            Ok(()) => report.record_delivered(),
            Err(error) => {
                tracing::error!(
                    recipient_id = %recipient_id,
                    kind = %kind,
                    error = %error,
                    "Failed to create SOS notification"
                );
                report.record_failure(recipient_id, kind, error.to_string());
            }
        }
    }
}
