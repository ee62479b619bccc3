//! v1 incident feed handler.

use axum::extract::State;
use axum_extra::extract::Query;

use crate::api::v1::dto::{IncidentFeedQuery, IncidentFeedResponse};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;

/// `GET /api/v1/map/incidents`
///
/// Builds the tiered feed for one user and viewport. Any failing source
/// fails the whole request; the feed is never silently partial.
#[utoipa::path(
    get,
    path = "/api/v1/map/incidents",
    tag = "feed",
    operation_id = "feed.mapIncidents",
    params(IncidentFeedQuery),
    responses(
        (status = 200, description = "Tiered incident feed", body = IncidentFeedResponse),
        (status = 400, description = "Invalid coordinates or radius", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn map_incidents(
    State(state): State<AppState>,
    Query(query): Query<IncidentFeedQuery>,
) -> ApiResponse<IncidentFeedResponse> {
    let radius = query
        .radius
        .unwrap_or(state.config.feed.default_radius_deg);

    match state
        .feed
        .incident_feed(&query.user_id, query.latitude, query.longitude, radius)
        .await
    {
        Ok(feed) => ApiResponse::success(IncidentFeedResponse::from(feed)),
        Err(e) => e.into(),
    }
}
