//! v1 circle handlers.

use axum::extract::{Path, State};
use axum_extra::extract::Query;
use validator::Validate;

use crate::api::v1::dto::{
    AddCircleMemberRequest, CircleMemberResponse, CircleResponse, CreateCircleRequest,
    ListCircleMembersResponse, ListCirclesQuery, ListCirclesResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::models::CircleRole;

/// `POST /api/v1/circles`
///
/// Creates a circle, deactivating the owner's previously active one and
/// enrolling the owner with the `owner` role.
#[utoipa::path(
    post,
    path = "/api/v1/circles",
    tag = "circles",
    operation_id = "circles.create",
    request_body = CreateCircleRequest,
    responses(
        (status = 201, description = "Circle created", body = CircleResponse),
        (status = 404, description = "Owner not found", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_circle(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateCircleRequest>,
) -> ApiResponse<CircleResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state
        .circles
        .create_circle(&req.user_id, &req.name, req.description.as_deref())
        .await
    {
        Ok(circle) => ApiResponse::created(CircleResponse::from(circle)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/circles`
#[utoipa::path(
    get,
    path = "/api/v1/circles",
    tag = "circles",
    operation_id = "circles.list",
    params(ListCirclesQuery),
    responses(
        (status = 200, description = "Owner's circles, newest first", body = ListCirclesResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_circles(
    State(state): State<AppState>,
    Query(query): Query<ListCirclesQuery>,
) -> ApiResponse<ListCirclesResponse> {
    match state.circles.circles_of(&query.owner_id).await {
        Ok(circles) => ApiResponse::success(ListCirclesResponse {
            circles: circles.into_iter().map(Into::into).collect(),
        }),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/circles/{circleId}/members`
#[utoipa::path(
    post,
    path = "/api/v1/circles/{circleId}/members",
    tag = "circles",
    operation_id = "circles.addMember",
    params(("circleId" = String, Path, description = "Circle ID")),
    request_body = AddCircleMemberRequest,
    responses(
        (status = 201, description = "Member enrolled", body = CircleMemberResponse),
        (status = 403, description = "Caller is not the owner", body = ApiError),
        (status = 404, description = "Circle or user not found", body = ApiError),
        (status = 409, description = "Already a member", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_circle_member(
    State(state): State<AppState>,
    Path(circle_id): Path<String>,
    axum::Json(req): axum::Json<AddCircleMemberRequest>,
) -> ApiResponse<CircleMemberResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    let role = req.role.unwrap_or(CircleRole::Member);

    match state
        .circles
        .add_member(&circle_id, &req.user_id, &req.member_id, role)
        .await
    {
        Ok(member) => ApiResponse::created(CircleMemberResponse::from(member)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/circles/{circleId}/members`
#[utoipa::path(
    get,
    path = "/api/v1/circles/{circleId}/members",
    tag = "circles",
    operation_id = "circles.listMembers",
    params(("circleId" = String, Path, description = "Circle ID")),
    responses(
        (status = 200, description = "Circle members in join order", body = ListCircleMembersResponse),
        (status = 404, description = "Circle not found", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_circle_members(
    State(state): State<AppState>,
    Path(circle_id): Path<String>,
) -> ApiResponse<ListCircleMembersResponse> {
    match state.circles.members(&circle_id).await {
        Ok(members) => ApiResponse::success(ListCircleMembersResponse {
            members: members.into_iter().map(Into::into).collect(),
        }),
        Err(e) => e.into(),
    }
}
