use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lantern API",
        version = "1.0.0",
        description = "Personal safety backend: SOS alerts, trusted circles, and a tiered incident feed.",
    ),
    paths(
        handlers::health::health_check,
        handlers::feed::map_incidents,
        handlers::sos::create_sos,
        handlers::sos::update_sos_status,
        handlers::sos::list_sos,
        handlers::incidents::create_report,
        handlers::incidents::ingest_news,
        handlers::circles::create_circle,
        handlers::circles::list_circles,
        handlers::circles::add_circle_member,
        handlers::circles::list_circle_members,
        handlers::friends::create_friend_request,
        handlers::friends::list_pending_requests,
        handlers::friends::accept_friend_request,
        handlers::friends::reject_friend_request,
        handlers::friends::list_friends,
        handlers::friends::remove_friend,
        handlers::notifications::list_notifications,
        handlers::notifications::mark_notification_read,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Common
        dto::common::UserResponse,
        // Feed
        dto::feed::IncidentFeedQuery,
        dto::feed::SosFeedItemResponse,
        dto::feed::IncidentFeedResponse,
        // SOS
        dto::sos::CreateSosRequest,
        dto::sos::UpdateSosStatusRequest,
        dto::sos::ListSosQuery,
        dto::sos::SosAlertResponse,
        dto::sos::DispatchFailureResponse,
        dto::sos::DispatchReportResponse,
        dto::sos::CreateSosResponse,
        dto::sos::UpdateSosStatusResponse,
        dto::sos::ListSosResponse,
        // Incidents
        dto::incidents::CreateReportRequest,
        dto::incidents::NewsIngestItemRequest,
        dto::incidents::NewsIngestRequest,
        dto::incidents::UserReportResponse,
        dto::incidents::NewsIncidentResponse,
        dto::incidents::NewsIngestResponse,
        // Circles
        dto::circles::CreateCircleRequest,
        dto::circles::ListCirclesQuery,
        dto::circles::AddCircleMemberRequest,
        dto::circles::CircleResponse,
        dto::circles::CircleMemberResponse,
        dto::circles::ListCirclesResponse,
        dto::circles::ListCircleMembersResponse,
        // Friends
        dto::friends::CreateFriendRequest,
        dto::friends::RespondFriendRequest,
        dto::friends::FriendUserQuery,
        dto::friends::FriendRequestResponse,
        dto::friends::PendingRequestsResponse,
        dto::friends::ListFriendsResponse,
        dto::friends::RemoveFriendResponse,
        // Notifications
        dto::notifications::ListNotificationsQuery,
        dto::notifications::NotificationResponse,
        dto::notifications::ListNotificationsResponse,
        dto::notifications::NotificationReadResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::GeocoderStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "feed", description = "Tiered incident feed for the map"),
        (name = "sos", description = "SOS alert lifecycle and dispatch"),
        (name = "incidents", description = "User reports and news ingestion"),
        (name = "circles", description = "Trusted circles and membership"),
        (name = "friends", description = "Friend requests and friendships"),
        (name = "notifications", description = "Stored notifications"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
