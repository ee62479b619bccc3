//! v1 notification handlers.

use axum::extract::{Path, State};
use axum_extra::extract::Query;

use crate::api::v1::dto::{
    ListNotificationsQuery, ListNotificationsResponse, NotificationReadResponse,
    NotificationResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;

/// `GET /api/v1/notifications`
///
/// Page/limit listing, newest first. Pagination is echoed in `meta`.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "notifications",
    operation_id = "notifications.list",
    params(ListNotificationsQuery),
    responses(
        (status = 200, description = "Notifications listed", body = ListNotificationsResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> ApiResponse<ListNotificationsResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    match state
        .db
        .list_notifications(&query.user_id, page, limit)
        .await
    {
        Ok((notifications, pagination)) => ApiResponse::success_with_meta(
            ListNotificationsResponse {
                notifications: notifications
                    .into_iter()
                    .map(NotificationResponse::from)
                    .collect(),
            },
            ResponseMeta::from(pagination),
        ),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/notifications/{notificationId}/read`
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{notificationId}/read",
    tag = "notifications",
    operation_id = "notifications.markRead",
    params(("notificationId" = String, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationReadResponse),
        (status = 404, description = "Notification not found", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> ApiResponse<NotificationReadResponse> {
    match state.db.mark_notification_read(&notification_id).await {
        Ok(true) => ApiResponse::success(NotificationReadResponse {
            notification_id,
            is_read: true,
        }),
        Ok(false) => ApiResponse::error(
            ErrorCode::NotFound,
            format!("Notification {notification_id} not found"),
        ),
        Err(e) => e.into(),
    }
}
