//! Incident feed DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use super::common::UserResponse;
use super::incidents::{NewsIncidentResponse, UserReportResponse};
use super::sos::SosAlertResponse;
use crate::models;

/// Query parameters for `GET /v1/map/incidents`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFeedQuery {
    /// The viewing user. Determines the trust graph and excludes their own
    /// alerts from the feed.
    pub user_id: String,
    /// Viewport center latitude in degrees.
    pub latitude: f64,
    /// Viewport center longitude in degrees.
    pub longitude: f64,
    /// Half-side of the viewport box in coordinate degrees. Defaults to the
    /// configured feed radius.
    pub radius: Option<f64>,
}

/// One SOS entry on the map, with its sender and the source tags that
/// matched it (`friend`, `circle`, `nearby`).
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SosFeedItemResponse {
    pub alert: SosAlertResponse,
    pub user: UserResponse,
    pub sources: Vec<models::SourceTag>,
}

impl From<models::SosFeedItem> for SosFeedItemResponse {
    fn from(item: models::SosFeedItem) -> Self {
        Self {
            alert: item.alert.into(),
            user: item.user.into(),
            sources: item.sources,
        }
    }
}

/// The tiered incident feed.
///
/// The tier keys are a fixed contract with the map clients and stay
/// snake_case on the wire: `p0_sos_friends`, `p1_sos_nearby_strangers`,
/// `p1_user_reports`, `p2_news_warnings`. Each list is ordered newest
/// first.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct IncidentFeedResponse {
    pub p0_sos_friends: Vec<SosFeedItemResponse>,
    pub p1_sos_nearby_strangers: Vec<SosFeedItemResponse>,
    pub p1_user_reports: Vec<UserReportResponse>,
    pub p2_news_warnings: Vec<NewsIncidentResponse>,
}

impl From<models::IncidentFeed> for IncidentFeedResponse {
    fn from(feed: models::IncidentFeed) -> Self {
        Self {
            p0_sos_friends: feed.p0_sos_friends.into_iter().map(Into::into).collect(),
            p1_sos_nearby_strangers: feed
                .p1_sos_nearby_strangers
                .into_iter()
                .map(Into::into)
                .collect(),
            p1_user_reports: feed.p1_user_reports.into_iter().map(Into::into).collect(),
            p2_news_warnings: feed.p2_news_warnings.into_iter().map(Into::into).collect(),
        }
    }
}
