//! Friend request and friendship DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::UserResponse;
use crate::models;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/friend-requests`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFriendRequest {
    /// The requesting user.
    #[validate(length(min = 1))]
    pub sender_id: String,
    /// The user being asked.
    #[validate(length(min = 1))]
    pub receiver_id: String,
}

/// Request body for `POST /v1/friend-requests/{requestId}/accept` and
/// `.../reject`. Only the receiver may respond.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondFriendRequest {
    /// The caller. Must be the request's receiver.
    #[validate(length(min = 1))]
    pub user_id: String,
}

/// Query parameters for `GET /v1/friend-requests/pending`, `GET /v1/friends`
/// and `DELETE /v1/friends/{friendId}`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FriendUserQuery {
    /// The acting user.
    pub user_id: String,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// One friend request row.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestResponse {
    /// Unique request ID (nanoid, 21 chars).
    pub request_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    /// `pending`, `accepted`, or `rejected`.
    pub status: models::FriendRequestStatus,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    /// Set when the receiver responded.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<models::FriendRequest> for FriendRequestResponse {
    fn from(request: models::FriendRequest) -> Self {
        Self {
            request_id: request.id,
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            status: request.status,
            created_at: request.created_at,
            responded_at: request.responded_at,
        }
    }
}

/// Response for `GET /v1/friend-requests/pending`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequestsResponse {
    pub requests: Vec<FriendRequestResponse>,
}

/// Response for `GET /v1/friends`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListFriendsResponse {
    pub friends: Vec<UserResponse>,
}

/// Response for `DELETE /v1/friends/{friendId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFriendResponse {
    pub friend_id: String,
    pub removed: bool,
}
