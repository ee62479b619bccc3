//! User report and news incident DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models;
use crate::services::NewsIngestItem;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/incidents/report`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    /// The reporting user.
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    /// Free-form category, e.g. `theft`, `harassment`, `unsafe_area`.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Severity score 0-100.
    pub severity: Option<u8>,
}

/// One item of a `POST /v1/news:ingest` batch.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsIngestItemRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub summary: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Place name to geocode when no coordinates are given.
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Canonical article URL. Upsert identity.
    #[validate(length(min = 1, max = 2048))]
    pub source_url: String,
    /// Publication timestamp from the source, when known.
    #[schema(value_type = Option<String>)]
    pub published_at: Option<DateTime<Utc>>,
    /// Severity score 0-100.
    pub severity: Option<u8>,
}

impl From<NewsIngestItemRequest> for NewsIngestItem {
    fn from(item: NewsIngestItemRequest) -> Self {
        Self {
            title: item.title,
            summary: item.summary,
            category: item.category,
            location_name: item.location_name,
            latitude: item.latitude,
            longitude: item.longitude,
            source_url: item.source_url,
            published_at: item.published_at,
            severity: item.severity,
        }
    }
}

/// Request body for `POST /v1/news:ingest`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsIngestRequest {
    #[validate(length(min = 1, max = 500), nested)]
    pub items: Vec<NewsIngestItemRequest>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// One user-submitted hazard report.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReportResponse {
    /// Unique report ID (nanoid, 21 chars).
    pub report_id: String,
    pub reporter_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
    /// `active`, `resolved`, or `invalid`.
    pub status: models::ReportStatus,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<models::UserReportIncident> for UserReportResponse {
    fn from(report: models::UserReportIncident) -> Self {
        Self {
            report_id: report.id,
            reporter_id: report.reporter_id,
            title: report.title,
            description: report.description,
            category: report.category,
            latitude: report.latitude,
            longitude: report.longitude,
            severity: report.severity,
            status: report.status,
            created_at: report.created_at,
        }
    }
}

/// One news-derived warning.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsIncidentResponse {
    /// Unique incident ID (nanoid, 21 chars). Stable across re-ingests of
    /// the same source URL.
    pub news_id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl From<models::NewsIncident> for NewsIncidentResponse {
    fn from(news: models::NewsIncident) -> Self {
        Self {
            news_id: news.id,
            title: news.title,
            summary: news.summary,
            category: news.category,
            location_name: news.location_name,
            latitude: news.latitude,
            longitude: news.longitude,
            source_url: news.source_url,
            published_at: news.published_at,
            severity: news.severity,
            created_at: news.created_at,
            updated_at: news.updated_at,
        }
    }
}

/// Response for `POST /v1/news:ingest`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsIngestResponse {
    /// Rows written or refreshed, in input order.
    pub ingested: Vec<NewsIncidentResponse>,
    /// Items dropped because neither coordinates nor a geocodable place
    /// name were available.
    pub skipped_no_location: u32,
}
