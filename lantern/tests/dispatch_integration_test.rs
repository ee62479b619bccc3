mod common;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use lantern::db::{
    CircleMemberStore, CircleStore, FriendStore, NewsStore, NotificationStore, ReportStore,
    SafetyBackend, SosAlertStore, UserStore,
};
use lantern::error::{LanternError, Result};
use lantern::models::{
    Circle, CircleMember, CircleRole, CircleStatus, FriendRequest, FriendRequestStatus, Friendship,
    NewsIncident, Notification, NotificationKind, Pagination, SosAlert, User, UserReportIncident,
};
use lantern::services::{AlertService, CircleService};

/// Delegates everything to the real backend but rejects notification
/// writes for one chosen recipient.
struct FailingNotifications {
    inner: Arc<dyn SafetyBackend>,
    fail_for: String,
}

#[async_trait]
impl UserStore for FailingNotifications {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.inner.get_user(id).await
    }
    async fn get_users_by_ids(&self, ids: &[String]) -> Result<Vec<User>> {
        self.inner.get_users_by_ids(ids).await
    }
    async fn create_user(&self, user: &User) -> Result<()> {
        self.inner.create_user(user).await
    }
}

#[async_trait]
impl FriendStore for FailingNotifications {
    async fn get_friends_by_user_id(&self, user_id: &str) -> Result<Vec<User>> {
        self.inner.get_friends_by_user_id(user_id).await
    }
    async fn get_friendship(&self, user_id: &str, friend_id: &str) -> Result<Option<Friendship>> {
        self.inner.get_friendship(user_id, friend_id).await
    }
    async fn create_friendship(&self, friendship: &Friendship) -> Result<()> {
        self.inner.create_friendship(friendship).await
    }
    async fn delete_friendship(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        self.inner.delete_friendship(user_id, friend_id).await
    }
    async fn create_friend_request(&self, request: &FriendRequest) -> Result<()> {
        self.inner.create_friend_request(request).await
    }
    async fn get_friend_request(&self, id: &str) -> Result<Option<FriendRequest>> {
        self.inner.get_friend_request(id).await
    }
    async fn get_pending_request_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<FriendRequest>> {
        self.inner.get_pending_request_between(user_a, user_b).await
    }
    async fn get_pending_requests_for(&self, receiver_id: &str) -> Result<Vec<FriendRequest>> {
        self.inner.get_pending_requests_for(receiver_id).await
    }
    async fn set_friend_request_status(
        &self,
        id: &str,
        status: FriendRequestStatus,
    ) -> Result<()> {
        self.inner.set_friend_request_status(id, status).await
    }
}

#[async_trait]
impl CircleStore for FailingNotifications {
    async fn get_circle(&self, id: &str) -> Result<Option<Circle>> {
        self.inner.get_circle(id).await
    }
    async fn get_circles_by_owner(&self, owner_id: &str) -> Result<Vec<Circle>> {
        self.inner.get_circles_by_owner(owner_id).await
    }
    async fn get_active_circle_by_owner(&self, owner_id: &str) -> Result<Option<Circle>> {
        self.inner.get_active_circle_by_owner(owner_id).await
    }
    async fn create_circle(&self, circle: &Circle) -> Result<()> {
        self.inner.create_circle(circle).await
    }
    async fn set_circle_status(&self, id: &str, status: CircleStatus) -> Result<()> {
        self.inner.set_circle_status(id, status).await
    }
}

#[async_trait]
impl CircleMemberStore for FailingNotifications {
    async fn get_members_by_circle(&self, circle_id: &str) -> Result<Vec<CircleMember>> {
        self.inner.get_members_by_circle(circle_id).await
    }
    async fn get_memberships_by_member(&self, member_id: &str) -> Result<Vec<CircleMember>> {
        self.inner.get_memberships_by_member(member_id).await
    }
    async fn create_member(&self, member: &CircleMember) -> Result<()> {
        self.inner.create_member(member).await
    }
}

#[async_trait]
impl SosAlertStore for FailingNotifications {
    async fn get_alert(&self, id: &str) -> Result<Option<SosAlert>> {
        self.inner.get_alert(id).await
    }
    async fn get_alerts_by_sender(&self, sender_id: &str) -> Result<Vec<SosAlert>> {
        self.inner.get_alerts_by_sender(sender_id).await
    }
    async fn get_open_alerts_by_sender_ids(&self, sender_ids: &[String]) -> Result<Vec<SosAlert>> {
        self.inner.get_open_alerts_by_sender_ids(sender_ids).await
    }
    async fn get_open_alerts_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<SosAlert>> {
        self.inner
            .get_open_alerts_within_radius(latitude, longitude, radius_deg)
            .await
    }
    async fn create_alert(&self, alert: &SosAlert) -> Result<()> {
        self.inner.create_alert(alert).await
    }
    async fn update_alert(&self, alert: &SosAlert) -> Result<()> {
        self.inner.update_alert(alert).await
    }
}

#[async_trait]
impl ReportStore for FailingNotifications {
    async fn create_report(&self, report: &UserReportIncident) -> Result<()> {
        self.inner.create_report(report).await
    }
    async fn get_reports_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<UserReportIncident>> {
        self.inner
            .get_reports_within_radius(latitude, longitude, radius_deg)
            .await
    }
}

#[async_trait]
impl NewsStore for FailingNotifications {
    async fn get_news_by_source_url_hash(&self, hash: &str) -> Result<Option<NewsIncident>> {
        self.inner.get_news_by_source_url_hash(hash).await
    }
    async fn upsert_news_by_source_url(&self, incident: &NewsIncident) -> Result<NewsIncident> {
        self.inner.upsert_news_by_source_url(incident).await
    }
    async fn get_news_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
        max_age_days: i64,
    ) -> Result<Vec<NewsIncident>> {
        self.inner
            .get_news_within_radius(latitude, longitude, radius_deg, max_age_days)
            .await
    }
}

#[async_trait]
impl NotificationStore for FailingNotifications {
    async fn create_notification(&self, notification: &Notification) -> Result<()> {
        if notification.recipient_id == self.fail_for {
            return Err(LanternError::Internal(
                "injected notification failure".to_string(),
            ));
        }
        self.inner.create_notification(notification).await
    }
    async fn get_notification(&self, id: &str) -> Result<Option<Notification>> {
        self.inner.get_notification(id).await
    }
    async fn list_notifications(
        &self,
        recipient_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Notification>, Pagination)> {
        self.inner.list_notifications(recipient_id, page, limit).await
    }
    async fn mark_notification_read(&self, id: &str) -> Result<bool> {
        self.inner.mark_notification_read(id).await
    }
}

#[async_trait]
impl SafetyBackend for FailingNotifications {
    async fn sync(&self) -> Result<()> {
        self.inner.sync().await
    }
}

async fn notifications_for(
    db: &dyn SafetyBackend,
    recipient_id: &str,
) -> Vec<Notification> {
    let (notifications, _) = db
        .list_notifications(recipient_id, 1, 50)
        .await
        .expect("list notifications");
    notifications
}

#[tokio::test]
async fn test_fanout_reaches_friends_and_circle_members() {
    let (_tmp, db) = common::setup_backend().await;
    for (id, name) in [("s", "Sam"), ("f1", "Fay"), ("f2", "Finn"), ("m1", "Mia")] {
        common::create_user(&*db, id, name).await;
    }
    common::befriend(&*db, "s", "f1").await;
    common::befriend(&*db, "s", "f2").await;

    let circles = CircleService::new(db.clone());
    let circle = circles.create_circle("s", "Climbing", None).await.unwrap();
    circles
        .add_member(&circle.id, "s", "f1", CircleRole::Member)
        .await
        .unwrap();
    circles
        .add_member(&circle.id, "s", "m1", CircleRole::Member)
        .await
        .unwrap();

    let alerts = AlertService::new(db.clone(), 255);
    let (alert, report) = alerts
        .create_alert("s", 10.0, 20.0, Some("Stuck on the north face"))
        .await
        .unwrap();

    assert_eq!(alert.circle_id.as_deref(), Some(circle.id.as_str()));
    assert_eq!(report.delivered, 4);
    assert!(report.failed.is_empty());

    // f1 is in both channels and gets one notification per channel.
    let f1_kinds: HashSet<NotificationKind> = notifications_for(&*db, "f1")
        .await
        .iter()
        .map(|n| n.kind)
        .collect();
    assert_eq!(
        f1_kinds,
        HashSet::from([NotificationKind::SosFriend, NotificationKind::SosCircle])
    );

    let f2 = notifications_for(&*db, "f2").await;
    assert_eq!(f2.len(), 1);
    assert_eq!(f2[0].kind, NotificationKind::SosFriend);
    assert_eq!(f2[0].title, "SOS from Sam");
    assert_eq!(f2[0].message, "Stuck on the north face");

    let m1 = notifications_for(&*db, "m1").await;
    assert_eq!(m1.len(), 1);
    assert_eq!(m1[0].kind, NotificationKind::SosCircle);

    assert!(notifications_for(&*db, "s").await.is_empty());
}

#[tokio::test]
async fn test_no_active_circle_uses_friend_channel_only() {
    let (_tmp, db) = common::setup_backend().await;
    common::create_user(&*db, "s", "Sam").await;
    common::create_user(&*db, "f1", "Fay").await;
    common::befriend(&*db, "s", "f1").await;

    let (alert, report) = AlertService::new(db.clone(), 255)
        .create_alert("s", 10.0, 20.0, None)
        .await
        .unwrap();

    assert!(alert.circle_id.is_none());
    assert_eq!(report.delivered, 1);
    let f1 = notifications_for(&*db, "f1").await;
    assert_eq!(f1[0].kind, NotificationKind::SosFriend);
}

#[tokio::test]
async fn test_long_message_is_truncated_in_alert_and_body() {
    let (_tmp, db) = common::setup_backend().await;
    common::create_user(&*db, "s", "Sam").await;
    common::create_user(&*db, "f1", "Fay").await;
    common::befriend(&*db, "s", "f1").await;

    let message = "a".repeat(300);
    let (alert, _) = AlertService::new(db.clone(), 255)
        .create_alert("s", 10.0, 20.0, Some(&message))
        .await
        .unwrap();

    let stored = alert.message.expect("stored message");
    assert_eq!(stored.chars().count(), 255);
    assert!(stored.ends_with('…'));

    let body = &notifications_for(&*db, "f1").await[0].message;
    assert_eq!(body.chars().count(), 255);
    assert!(body.ends_with('…'));
}

#[tokio::test]
async fn test_missing_message_gets_fallback_body() {
    let (_tmp, db) = common::setup_backend().await;
    common::create_user(&*db, "s", "Sam").await;
    common::create_user(&*db, "f1", "Fay").await;
    common::befriend(&*db, "s", "f1").await;

    AlertService::new(db.clone(), 255)
        .create_alert("s", 10.0, 20.0, None)
        .await
        .unwrap();

    let f1 = notifications_for(&*db, "f1").await;
    assert_eq!(f1[0].message, "Sam sent an SOS alert.");
}

#[tokio::test]
async fn test_one_failed_recipient_does_not_block_the_rest() {
    let (_tmp, db) = common::setup_backend().await;
    for (id, name) in [("s", "Sam"), ("f1", "Fay"), ("f2", "Finn")] {
        common::create_user(&*db, id, name).await;
    }
    common::befriend(&*db, "s", "f1").await;
    common::befriend(&*db, "s", "f2").await;

    let flaky: Arc<dyn SafetyBackend> = Arc::new(FailingNotifications {
        inner: db.clone(),
        fail_for: "f1".to_string(),
    });

    let (alert, report) = AlertService::new(flaky, 255)
        .create_alert("s", 10.0, 20.0, Some("help"))
        .await
        .unwrap();

    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].recipient_id, "f1");
    assert_eq!(report.failed[0].kind, NotificationKind::SosFriend);
    assert!(report.failed[0].error.contains("injected"));

    // The alert row itself is unaffected by delivery problems.
    assert!(db.get_alert(&alert.id).await.unwrap().is_some());
    assert!(notifications_for(&*db, "f1").await.is_empty());
    assert_eq!(notifications_for(&*db, "f2").await.len(), 1);
}
