//! v1 friend request and friendship handlers.

use axum::extract::{Path, State};
use axum_extra::extract::Query;
use validator::Validate;

use crate::api::v1::dto::{
    CreateFriendRequest, FriendRequestResponse, FriendUserQuery, ListFriendsResponse,
    PendingRequestsResponse, RemoveFriendResponse, RespondFriendRequest,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `POST /api/v1/friend-requests`
#[utoipa::path(
    post,
    path = "/api/v1/friend-requests",
    tag = "friends",
    operation_id = "friendRequests.create",
    request_body = CreateFriendRequest,
    responses(
        (status = 201, description = "Request sent", body = FriendRequestResponse),
        (status = 404, description = "Sender or receiver not found", body = ApiError),
        (status = 409, description = "Already friends or already pending", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_friend_request(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateFriendRequest>,
) -> ApiResponse<FriendRequestResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state
        .friends
        .send_request(&req.sender_id, &req.receiver_id)
        .await
    {
        Ok(request) => ApiResponse::created(FriendRequestResponse::from(request)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/friend-requests/pending`
#[utoipa::path(
    get,
    path = "/api/v1/friend-requests/pending",
    tag = "friends",
    operation_id = "friendRequests.pending",
    params(FriendUserQuery),
    responses(
        (status = 200, description = "Pending requests addressed to the user", body = PendingRequestsResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pending_requests(
    State(state): State<AppState>,
    Query(query): Query<FriendUserQuery>,
) -> ApiResponse<PendingRequestsResponse> {
    match state.friends.pending_for(&query.user_id).await {
        Ok(requests) => ApiResponse::success(PendingRequestsResponse {
            requests: requests.into_iter().map(Into::into).collect(),
        }),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/friend-requests/{requestId}/accept`
#[utoipa::path(
    post,
    path = "/api/v1/friend-requests/{requestId}/accept",
    tag = "friends",
    operation_id = "friendRequests.accept",
    params(("requestId" = String, Path, description = "Friend request ID")),
    request_body = RespondFriendRequest,
    responses(
        (status = 200, description = "Request accepted, friendship created", body = FriendRequestResponse),
        (status = 403, description = "Caller is not the receiver", body = ApiError),
        (status = 404, description = "Request not found", body = ApiError),
        (status = 409, description = "Request already responded to", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn accept_friend_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    axum::Json(req): axum::Json<RespondFriendRequest>,
) -> ApiResponse<FriendRequestResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state.friends.accept(&request_id, &req.user_id).await {
        Ok(request) => ApiResponse::success(FriendRequestResponse::from(request)),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/friend-requests/{requestId}/reject`
#[utoipa::path(
    post,
    path = "/api/v1/friend-requests/{requestId}/reject",
    tag = "friends",
    operation_id = "friendRequests.reject",
    params(("requestId" = String, Path, description = "Friend request ID")),
    request_body = RespondFriendRequest,
    responses(
        (status = 200, description = "Request rejected", body = FriendRequestResponse),
        (status = 403, description = "Caller is not the receiver", body = ApiError),
        (status = 404, description = "Request not found", body = ApiError),
        (status = 409, description = "Request already responded to", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn reject_friend_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    axum::Json(req): axum::Json<RespondFriendRequest>,
) -> ApiResponse<FriendRequestResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    match state.friends.reject(&request_id, &req.user_id).await {
        Ok(request) => ApiResponse::success(FriendRequestResponse::from(request)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/friends`
#[utoipa::path(
    get,
    path = "/api/v1/friends",
    tag = "friends",
    operation_id = "friends.list",
    params(FriendUserQuery),
    responses(
        (status = 200, description = "Friends sorted by display name", body = ListFriendsResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_friends(
    State(state): State<AppState>,
    Query(query): Query<FriendUserQuery>,
) -> ApiResponse<ListFriendsResponse> {
    match state.friends.friends_of(&query.user_id).await {
        Ok(friends) => ApiResponse::success(ListFriendsResponse {
            friends: friends.into_iter().map(Into::into).collect(),
        }),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/friends/{friendId}`
#[utoipa::path(
    delete,
    path = "/api/v1/friends/{friendId}",
    tag = "friends",
    operation_id = "friends.remove",
    params(
        ("friendId" = String, Path, description = "The friend to remove"),
        FriendUserQuery,
    ),
    responses(
        (status = 200, description = "Friendship removed", body = RemoveFriendResponse),
        (status = 404, description = "No such friendship", body = ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_friend(
    State(state): State<AppState>,
    Path(friend_id): Path<String>,
    Query(query): Query<FriendUserQuery>,
) -> ApiResponse<RemoveFriendResponse> {
    match state.friends.remove_friend(&query.user_id, &friend_id).await {
        Ok(()) => ApiResponse::success(RemoveFriendResponse {
            friend_id,
            removed: true,
        }),
        Err(e) => e.into(),
    }
}
