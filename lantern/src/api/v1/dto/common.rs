//! Shared DTOs used across several v1 endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models;

/// Public user profile as embedded in friend lists and feed items.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user ID (nanoid, 21 chars).
    pub user_id: String,
    /// Name shown in notifications and on the map.
    pub display_name: String,
    /// Avatar image URL, when the user has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// When the user row was created.
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<models::User> for UserResponse {
    fn from(user: models::User) -> Self {
        Self {
            user_id: user.id,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn user_response_serializes_camel_case() {
        let resp = UserResponse::from(User::new("u1".to_string(), "Alice".to_string()));
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["displayName"], "Alice");
        assert!(json.get("avatarUrl").is_none());
        assert!(json.get("user_id").is_none());
    }
}
