//! v1 user report and news ingest handlers.

use axum::extract::State;
use validator::Validate;

use crate::api::v1::dto::{
    CreateReportRequest, NewsIngestRequest, NewsIngestResponse, UserReportResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::services::NewReport;

/// `POST /api/v1/incidents/report`
#[utoipa::path(
    post,
    path = "/api/v1/incidents/report",
    tag = "incidents",
    operation_id = "incidents.report",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report created", body = UserReportResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Reporter not found", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_report(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateReportRequest>,
) -> ApiResponse<UserReportResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    let report = NewReport {
        title: req.title,
        description: req.description,
        category: req.category,
        latitude: req.latitude,
        longitude: req.longitude,
        severity: req.severity,
    };

    match state.reports.create_report(&req.user_id, report).await {
        Ok(created) => ApiResponse::created(UserReportResponse::from(created)),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/news:ingest`
///
/// Batch upsert of news-derived warnings, keyed on the source URL. Meant
/// for the scraper jobs, but carried on the same bearer auth as the rest
/// of the API.
#[utoipa::path(
    post,
    path = "/api/v1/news:ingest",
    tag = "incidents",
    operation_id = "news.ingest",
    request_body = NewsIngestRequest,
    responses(
        (status = 200, description = "Batch ingested", body = NewsIngestResponse),
        (status = 400, description = "Invalid batch", body = ApiError),
        (status = 502, description = "Geocoder unavailable", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn ingest_news(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<NewsIngestRequest>,
) -> ApiResponse<NewsIngestResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    let items = req.items.into_iter().map(Into::into).collect();

    match state.news.ingest(items).await {
        Ok(summary) => ApiResponse::success(NewsIngestResponse {
            ingested: summary.ingested.into_iter().map(Into::into).collect(),
            skipped_no_location: summary.skipped_no_location,
        }),
        Err(e) => e.into(),
    }
}
