use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row per undirected friendship edge. Queries match either column, so
/// neither side is "the" owner of the edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub id: String,
    pub user_id: String,
    pub friend_id: String,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn new(id: String, user_id: String, friend_id: String) -> Self {
        Self {
            id,
            user_id,
            friend_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FriendRequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for FriendRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for FriendRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Unknown friend request status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl FriendRequest {
    pub fn new(id: String, sender_id: String, receiver_id: String) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            status: FriendRequestStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friend_request_status_round_trip() {
        for status in [
            FriendRequestStatus::Pending,
            FriendRequestStatus::Accepted,
            FriendRequestStatus::Rejected,
        ] {
            let parsed: FriendRequestStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("blocked".parse::<FriendRequestStatus>().is_err());
    }
}
