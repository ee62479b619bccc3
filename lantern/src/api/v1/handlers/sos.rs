//! v1 SOS alert handlers.
//!
//! Alert creation persists first and fans out second, so a degraded
//! notification path never loses the alert itself. The fan-out outcome is
//! reported back to the caller in the same response.

use axum::extract::{Path, State};
use axum_extra::extract::Query;
use validator::Validate;

use crate::api::v1::dto::{
    CreateSosRequest, CreateSosResponse, ListSosQuery, ListSosResponse, UpdateSosStatusRequest,
    UpdateSosStatusResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `POST /api/v1/sos`
#[utoipa::path(
    post,
    path = "/api/v1/sos",
    tag = "sos",
    operation_id = "sos.create",
    request_body = CreateSosRequest,
    responses(
        (status = 201, description = "Alert created and dispatched", body = CreateSosResponse),
        (status = 400, description = "Invalid coordinates", body = ApiError),
        (status = 404, description = "Sender not found", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_sos(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateSosRequest>,
) -> ApiResponse<CreateSosResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state
        .alerts
        .create_alert(
            &req.user_id,
            req.latitude,
            req.longitude,
            req.message.as_deref(),
        )
        .await
    {
        Ok((alert, dispatch)) => ApiResponse::created(CreateSosResponse {
            alert: alert.into(),
            dispatch: dispatch.into(),
        }),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/sos/{alertId}/status`
#[utoipa::path(
    post,
    path = "/api/v1/sos/{alertId}/status",
    tag = "sos",
    operation_id = "sos.updateStatus",
    params(("alertId" = String, Path, description = "Alert ID")),
    request_body = UpdateSosStatusRequest,
    responses(
        (status = 200, description = "Alert status updated", body = UpdateSosStatusResponse),
        (status = 403, description = "Caller is not the sender", body = ApiError),
        (status = 404, description = "Alert not found", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_sos_status(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
    axum::Json(req): axum::Json<UpdateSosStatusRequest>,
) -> ApiResponse<UpdateSosStatusResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state
        .alerts
        .update_status(&alert_id, &req.user_id, req.status)
        .await
    {
        Ok((alert, dispatch)) => ApiResponse::success(UpdateSosStatusResponse {
            alert: alert.into(),
            dispatch: dispatch.map(Into::into),
        }),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/sos`
#[utoipa::path(
    get,
    path = "/api/v1/sos",
    tag = "sos",
    operation_id = "sos.list",
    params(ListSosQuery),
    responses(
        (status = 200, description = "Caller's alerts, newest first", body = ListSosResponse),
        (status = 404, description = "User not found", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_sos(
    State(state): State<AppState>,
    Query(query): Query<ListSosQuery>,
) -> ApiResponse<ListSosResponse> {
    match state.alerts.alerts_by_sender(&query.user_id).await {
        Ok(alerts) => ApiResponse::success(ListSosResponse {
            alerts: alerts.into_iter().map(Into::into).collect(),
        }),
        Err(e) => e.into(),
    }
}
