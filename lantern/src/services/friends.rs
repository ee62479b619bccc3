use std::sync::Arc;

use chrono::Utc;
use nanoid::nanoid;

use crate::db::SafetyBackend;
use crate::error::{LanternError, Result};
use crate::models::{FriendRequest, FriendRequestStatus, Friendship, User};

/// Friend requests and the symmetric friendship edges they produce.
#[derive(Clone)]
pub struct FriendService {
    db: Arc<dyn SafetyBackend>,
}

impl FriendService {
    pub fn new(db: Arc<dyn SafetyBackend>) -> Self {
        Self { db }
    }

    /// At most one pending request may exist per pair, counted in either
    /// direction; an existing friendship also blocks a new request.
    pub async fn send_request(&self, sender_id: &str, receiver_id: &str) -> Result<FriendRequest> {
        if sender_id == receiver_id {
            return Err(LanternError::InvalidArgument(
                "Cannot send a friend request to yourself".to_string(),
            ));
        }

        self.db
            .get_user(sender_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("User '{sender_id}' not found")))?;
        self.db
            .get_user(receiver_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("User '{receiver_id}' not found")))?;

        if self.db.get_friendship(sender_id, receiver_id).await?.is_some() {
            return Err(LanternError::Conflict("Users are already friends".to_string()));
        }
        if self
            .db
            .get_pending_request_between(sender_id, receiver_id)
            .await?
            .is_some()
        {
            return Err(LanternError::Conflict(
                "A pending friend request already exists between these users".to_string(),
            ));
        }

        let request = FriendRequest::new(nanoid!(), sender_id.to_string(), receiver_id.to_string());
        self.db.create_friend_request(&request).await?;
        Ok(request)
    }

    /// Accepting creates the friendship edge and then marks the request.
    pub async fn accept(&self, request_id: &str, caller_id: &str) -> Result<FriendRequest> {
        let request = self.respondable_request(request_id, caller_id).await?;

        let friendship = Friendship::new(
            nanoid!(),
            request.sender_id.clone(),
            request.receiver_id.clone(),
        );
        self.db.create_friendship(&friendship).await?;
        self.db
            .set_friend_request_status(&request.id, FriendRequestStatus::Accepted)
            .await?;

        Ok(FriendRequest {
            status: FriendRequestStatus::Accepted,
            responded_at: Some(Utc::now()),
            ..request
        })
    }

    pub async fn reject(&self, request_id: &str, caller_id: &str) -> Result<FriendRequest> {
        let request = self.respondable_request(request_id, caller_id).await?;

        self.db
            .set_friend_request_status(&request.id, FriendRequestStatus::Rejected)
            .await?;

        Ok(FriendRequest {
            status: FriendRequestStatus::Rejected,
            responded_at: Some(Utc::now()),
            ..request
        })
    }

    pub async fn pending_for(&self, receiver_id: &str) -> Result<Vec<FriendRequest>> {
        self.db.get_pending_requests_for(receiver_id).await
    }

    pub async fn friends_of(&self, user_id: &str) -> Result<Vec<User>> {
        self.db.get_friends_by_user_id(user_id).await
    }

    /// Either side may remove the edge.
    pub async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<()> {
        let removed = self.db.delete_friendship(user_id, friend_id).await?;
        if !removed {
            return Err(LanternError::NotFound(format!(
                "No friendship between '{user_id}' and '{friend_id}'"
            )));
        }
        Ok(())
    }

    /// Shared guard for accept/reject: the request must exist, still be
    /// pending, and the caller must be its receiver.
    async fn respondable_request(
        &self,
        request_id: &str,
        caller_id: &str,
    ) -> Result<FriendRequest> {
        let request = self
            .db
            .get_friend_request(request_id)
            .await?
            .ok_or_else(|| {
                LanternError::NotFound(format!("Friend request '{request_id}' not found"))
            })?;

        if request.receiver_id != caller_id {
            return Err(LanternError::Forbidden(
                "Only the receiver can respond to a friend request".to_string(),
            ));
        }
        if request.status != FriendRequestStatus::Pending {
            return Err(LanternError::Conflict(
                "Friend request has already been responded to".to_string(),
            ));
        }

        Ok(request)
    }
}
