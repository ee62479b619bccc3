use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::{
    AlertRepository, CircleMemberRepository, CircleRepository, FriendRepository, NewsRepository,
    NotificationRepository, ReportRepository, UserRepository,
};
use crate::db::traits::{
    CircleMemberStore, CircleStore, FriendStore, NewsStore, NotificationStore, ReportStore,
    SafetyBackend, SosAlertStore, UserStore,
};
use crate::error::Result;
use crate::models::{
    Circle, CircleMember, CircleStatus, FriendRequest, FriendRequestStatus, Friendship,
    NewsIncident, Notification, Pagination, SosAlert, User, UserReportIncident,
};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for LibSqlBackend {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.db.connect()?;
        UserRepository::get_by_id(&conn, id).await
    }
    async fn get_users_by_ids(&self, ids: &[String]) -> Result<Vec<User>> {
        let conn = self.db.connect()?;
        UserRepository::get_by_ids(&conn, ids).await
    }
    async fn create_user(&self, user: &User) -> Result<()> {
        let conn = self.db.connect()?;
        UserRepository::create(&conn, user).await
    }
}

#[async_trait]
impl FriendStore for LibSqlBackend {
    async fn get_friends_by_user_id(&self, user_id: &str) -> Result<Vec<User>> {
        let conn = self.db.connect()?;
        FriendRepository::get_friends_by_user_id(&conn, user_id).await
    }
    async fn get_friendship(&self, user_id: &str, friend_id: &str) -> Result<Option<Friendship>> {
        let conn = self.db.connect()?;
        FriendRepository::get_friendship(&conn, user_id, friend_id).await
    }
    async fn create_friendship(&self, friendship: &Friendship) -> Result<()> {
        let conn = self.db.connect()?;
        FriendRepository::create_friendship(&conn, friendship).await
    }
    async fn delete_friendship(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        FriendRepository::delete_friendship(&conn, user_id, friend_id).await
    }
    async fn create_friend_request(&self, request: &FriendRequest) -> Result<()> {
        let conn = self.db.connect()?;
        FriendRepository::create_request(&conn, request).await
    }
    async fn get_friend_request(&self, id: &str) -> Result<Option<FriendRequest>> {
        let conn = self.db.connect()?;
        FriendRepository::get_request(&conn, id).await
    }
    async fn get_pending_request_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<FriendRequest>> {
        let conn = self.db.connect()?;
        FriendRepository::get_pending_between(&conn, user_a, user_b).await
    }
    async fn get_pending_requests_for(&self, receiver_id: &str) -> Result<Vec<FriendRequest>> {
        let conn = self.db.connect()?;
        FriendRepository::get_pending_for(&conn, receiver_id).await
    }
    async fn set_friend_request_status(
        &self,
        id: &str,
        status: FriendRequestStatus,
    ) -> Result<()> {
        let conn = self.db.connect()?;
        FriendRepository::set_request_status(&conn, id, status).await
    }
}

#[async_trait]
impl CircleStore for LibSqlBackend {
    async fn get_circle(&self, id: &str) -> Result<Option<Circle>> {
        let conn = self.db.connect()?;
        CircleRepository::get_by_id(&conn, id).await
    }
    async fn get_circles_by_owner(&self, owner_id: &str) -> Result<Vec<Circle>> {
        let conn = self.db.connect()?;
        CircleRepository::get_by_owner(&conn, owner_id).await
    }
    async fn get_active_circle_by_owner(&self, owner_id: &str) -> Result<Option<Circle>> {
        let conn = self.db.connect()?;
        CircleRepository::get_active_by_owner(&conn, owner_id).await
    }
    async fn create_circle(&self, circle: &Circle) -> Result<()> {
        let conn = self.db.connect()?;
        CircleRepository::create(&conn, circle).await
    }
    async fn set_circle_status(&self, id: &str, status: CircleStatus) -> Result<()> {
        let conn = self.db.connect()?;
        CircleRepository::set_status(&conn, id, status).await
    }
}

#[async_trait]
impl CircleMemberStore for LibSqlBackend {
    async fn get_members_by_circle(&self, circle_id: &str) -> Result<Vec<CircleMember>> {
        let conn = self.db.connect()?;
        CircleMemberRepository::get_by_circle(&conn, circle_id).await
    }
    async fn get_memberships_by_member(&self, member_id: &str) -> Result<Vec<CircleMember>> {
        let conn = self.db.connect()?;
        CircleMemberRepository::get_by_member(&conn, member_id).await
    }
    async fn create_member(&self, member: &CircleMember) -> Result<()> {
        let conn = self.db.connect()?;
        CircleMemberRepository::create(&conn, member).await
    }
}

#[async_trait]
impl SosAlertStore for LibSqlBackend {
    async fn get_alert(&self, id: &str) -> Result<Option<SosAlert>> {
        let conn = self.db.connect()?;
        AlertRepository::get_by_id(&conn, id).await
    }
    async fn get_alerts_by_sender(&self, sender_id: &str) -> Result<Vec<SosAlert>> {
        let conn = self.db.connect()?;
        AlertRepository::get_by_sender(&conn, sender_id).await
    }
    async fn get_open_alerts_by_sender_ids(&self, sender_ids: &[String]) -> Result<Vec<SosAlert>> {
        let conn = self.db.connect()?;
        AlertRepository::get_open_by_sender_ids(&conn, sender_ids).await
    }
    async fn get_open_alerts_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<SosAlert>> {
        let conn = self.db.connect()?;
        AlertRepository::get_open_within_radius(&conn, latitude, longitude, radius_deg).await
    }
    async fn create_alert(&self, alert: &SosAlert) -> Result<()> {
        let conn = self.db.connect()?;
        AlertRepository::create(&conn, alert).await
    }
    async fn update_alert(&self, alert: &SosAlert) -> Result<()> {
        let conn = self.db.connect()?;
        AlertRepository::update(&conn, alert).await
    }
}

#[async_trait]
impl ReportStore for LibSqlBackend {
    async fn create_report(&self, report: &UserReportIncident) -> Result<()> {
        let conn = self.db.connect()?;
        ReportRepository::create(&conn, report).await
    }
    async fn get_reports_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<UserReportIncident>> {
        let conn = self.db.connect()?;
        ReportRepository::get_within_radius(&conn, latitude, longitude, radius_deg).await
    }
}

#[async_trait]
impl NewsStore for LibSqlBackend {
    async fn get_news_by_source_url_hash(&self, hash: &str) -> Result<Option<NewsIncident>> {
        let conn = self.db.connect()?;
        NewsRepository::get_by_source_url_hash(&conn, hash).await
    }
    async fn upsert_news_by_source_url(&self, incident: &NewsIncident) -> Result<NewsIncident> {
        let conn = self.db.connect()?;
        NewsRepository::upsert_by_source_url(&conn, incident).await
    }
    async fn get_news_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
        max_age_days: i64,
    ) -> Result<Vec<NewsIncident>> {
        let conn = self.db.connect()?;
        NewsRepository::get_within_radius(&conn, latitude, longitude, radius_deg, max_age_days)
            .await
    }
}

#[async_trait]
impl NotificationStore for LibSqlBackend {
    async fn create_notification(&self, notification: &Notification) -> Result<()> {
        let conn = self.db.connect()?;
        NotificationRepository::create(&conn, notification).await
    }
    async fn get_notification(&self, id: &str) -> Result<Option<Notification>> {
        let conn = self.db.connect()?;
        NotificationRepository::get_by_id(&conn, id).await
    }
    async fn list_notifications(
        &self,
        recipient_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Notification>, Pagination)> {
        let conn = self.db.connect()?;
        NotificationRepository::list_by_recipient(&conn, recipient_id, page, limit).await
    }
    async fn mark_notification_read(&self, id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        NotificationRepository::mark_read(&conn, id).await
    }
}

#[async_trait]
impl SafetyBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
