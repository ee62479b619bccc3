use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Circle, CircleMember, CircleStatus, FriendRequest, FriendRequestStatus, Friendship,
    NewsIncident, Notification, Pagination, SosAlert, User, UserReportIncident,
};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// Read and seed operations for user profiles.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn get_users_by_ids(&self, ids: &[String]) -> Result<Vec<User>>;
    async fn create_user(&self, user: &User) -> Result<()>;
}

/// Friendship edges and the request flow that creates them.
#[async_trait]
pub trait FriendStore: Send + Sync {
    async fn get_friends_by_user_id(&self, user_id: &str) -> Result<Vec<User>>;
    async fn get_friendship(&self, user_id: &str, friend_id: &str) -> Result<Option<Friendship>>;
    async fn create_friendship(&self, friendship: &Friendship) -> Result<()>;
    async fn delete_friendship(&self, user_id: &str, friend_id: &str) -> Result<bool>;

    async fn create_friend_request(&self, request: &FriendRequest) -> Result<()>;
    async fn get_friend_request(&self, id: &str) -> Result<Option<FriendRequest>>;
    async fn get_pending_request_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<FriendRequest>>;
    async fn get_pending_requests_for(&self, receiver_id: &str) -> Result<Vec<FriendRequest>>;
    async fn set_friend_request_status(
        &self,
        id: &str,
        status: FriendRequestStatus,
    ) -> Result<()>;
}

/// Circle rows. Status changes go through here; the single-active rule
/// lives in the service layer.
#[async_trait]
pub trait CircleStore: Send + Sync {
    async fn get_circle(&self, id: &str) -> Result<Option<Circle>>;
    async fn get_circles_by_owner(&self, owner_id: &str) -> Result<Vec<Circle>>;
    async fn get_active_circle_by_owner(&self, owner_id: &str) -> Result<Option<Circle>>;
    async fn create_circle(&self, circle: &Circle) -> Result<()>;
    async fn set_circle_status(&self, id: &str, status: CircleStatus) -> Result<()>;
}

/// Circle membership rows.
#[async_trait]
pub trait CircleMemberStore: Send + Sync {
    async fn get_members_by_circle(&self, circle_id: &str) -> Result<Vec<CircleMember>>;
    async fn get_memberships_by_member(&self, member_id: &str) -> Result<Vec<CircleMember>>;
    async fn create_member(&self, member: &CircleMember) -> Result<()>;
}

/// SOS alert rows, including the two radius- and network-scoped reads the
/// feed is built from.
#[async_trait]
pub trait SosAlertStore: Send + Sync {
    async fn get_alert(&self, id: &str) -> Result<Option<SosAlert>>;
    async fn get_alerts_by_sender(&self, sender_id: &str) -> Result<Vec<SosAlert>>;
    /// Open alerts (pending or active) whose sender is in `sender_ids`.
    async fn get_open_alerts_by_sender_ids(&self, sender_ids: &[String]) -> Result<Vec<SosAlert>>;
    /// Open alerts inside the bounding box of half-side `radius_deg`.
    async fn get_open_alerts_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<SosAlert>>;
    async fn create_alert(&self, alert: &SosAlert) -> Result<()>;
    async fn update_alert(&self, alert: &SosAlert) -> Result<()>;
}

/// User-submitted hazard reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn create_report(&self, report: &UserReportIncident) -> Result<()>;
    /// Active reports inside the bounding box.
    async fn get_reports_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<UserReportIncident>>;
}

/// News-derived hazard rows, keyed for upsert by source URL hash.
#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn get_news_by_source_url_hash(&self, hash: &str) -> Result<Option<NewsIncident>>;
    async fn upsert_news_by_source_url(&self, incident: &NewsIncident) -> Result<NewsIncident>;
    async fn get_news_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
        max_age_days: i64,
    ) -> Result<Vec<NewsIncident>>;
}

/// Stored notifications and their read state.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create_notification(&self, notification: &Notification) -> Result<()>;
    async fn get_notification(&self, id: &str) -> Result<Option<Notification>>;
    async fn list_notifications(
        &self,
        recipient_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Notification>, Pagination)>;
    async fn mark_notification_read(&self, id: &str) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// A complete storage backend combining every store trait plus lifecycle
/// operations.
#[async_trait]
pub trait SafetyBackend:
    UserStore
    + FriendStore
    + CircleStore
    + CircleMemberStore
    + SosAlertStore
    + ReportStore
    + NewsStore
    + NotificationStore
{
    /// Sync with remote (e.g. Turso replication). No-op for local backends.
    async fn sync(&self) -> Result<()>;
}
