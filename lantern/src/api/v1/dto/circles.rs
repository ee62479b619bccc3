//! Circle request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/circles`.
///
/// Creating a circle deactivates any other active circle the owner has and
/// enrolls the owner as a member with the `owner` role.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCircleRequest {
    /// The circle owner.
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Query parameters for `GET /v1/circles`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListCirclesQuery {
    /// The owner whose circles to list.
    pub owner_id: String,
}

/// Request body for `POST /v1/circles/{circleId}/members`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCircleMemberRequest {
    /// The caller. Must be the circle owner.
    #[validate(length(min = 1))]
    pub user_id: String,
    /// The user to enroll.
    #[validate(length(min = 1))]
    pub member_id: String,
    /// Role for the new member. Defaults to `member`.
    pub role: Option<models::CircleRole>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// One circle row.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CircleResponse {
    /// Unique circle ID (nanoid, 21 chars).
    pub circle_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
    /// `active`, `inactive`, or `archived`.
    pub status: models::CircleStatus,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<models::Circle> for CircleResponse {
    fn from(circle: models::Circle) -> Self {
        Self {
            circle_id: circle.id,
            name: circle.name,
            description: circle.description,
            owner_id: circle.owner_id,
            status: circle.status,
            created_at: circle.created_at,
        }
    }
}

/// One circle membership row.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CircleMemberResponse {
    /// Unique membership ID (nanoid, 21 chars).
    pub membership_id: String,
    pub circle_id: String,
    pub member_id: String,
    /// `owner`, `admin`, or `member`.
    pub role: models::CircleRole,
    #[schema(value_type = String)]
    pub joined_at: DateTime<Utc>,
}

impl From<models::CircleMember> for CircleMemberResponse {
    fn from(member: models::CircleMember) -> Self {
        Self {
            membership_id: member.id,
            circle_id: member.circle_id,
            member_id: member.member_id,
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}

/// Response for `GET /v1/circles`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCirclesResponse {
    pub circles: Vec<CircleResponse>,
}

/// Response for `GET /v1/circles/{circleId}/members`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCircleMembersResponse {
    pub members: Vec<CircleMemberResponse>,
}
