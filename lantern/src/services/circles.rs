use std::sync::Arc;

use nanoid::nanoid;

use crate::db::SafetyBackend;
use crate::error::{LanternError, Result};
use crate::models::{Circle, CircleMember, CircleRole, CircleStatus};

/// Owns the single-active-circle rule: whatever else happens, an owner
/// never ends up with two active circles.
#[derive(Clone)]
pub struct CircleService {
    db: Arc<dyn SafetyBackend>,
}

impl CircleService {
    pub fn new(db: Arc<dyn SafetyBackend>) -> Self {
        Self { db }
    }

    /// Deactivates every active circle the owner has, then creates the new
    /// one as active and enrolls the owner. A failed deactivation aborts
    /// before anything is created, so the invariant cannot be violated by
    /// a partial run.
    pub async fn create_circle(
        &self,
        owner_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Circle> {
        self.db
            .get_user(owner_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("User '{owner_id}' not found")))?;

        for existing in self.db.get_circles_by_owner(owner_id).await? {
            if existing.status == CircleStatus::Active {
                self.db
                    .set_circle_status(&existing.id, CircleStatus::Inactive)
                    .await?;
                tracing::debug!(
                    owner_id = owner_id,
                    circle_id = %existing.id,
                    "Deactivated previous active circle"
                );
            }
        }

        let mut circle = Circle::new(nanoid!(), name.to_string(), owner_id.to_string());
        circle.description = description.map(str::to_string);
        self.db.create_circle(&circle).await?;

        let owner_member = CircleMember::new(
            nanoid!(),
            circle.id.clone(),
            owner_id.to_string(),
            CircleRole::Owner,
        );
        self.db.create_member(&owner_member).await?;

        Ok(circle)
    }

    pub async fn active_circle(&self, owner_id: &str) -> Result<Option<Circle>> {
        self.db.get_active_circle_by_owner(owner_id).await
    }

    pub async fn circles_of(&self, owner_id: &str) -> Result<Vec<Circle>> {
        self.db.get_circles_by_owner(owner_id).await
    }

    /// Only the circle owner may add members.
    pub async fn add_member(
        &self,
        circle_id: &str,
        caller_id: &str,
        member_id: &str,
        role: CircleRole,
    ) -> Result<CircleMember> {
        let circle = self
            .db
            .get_circle(circle_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("Circle '{circle_id}' not found")))?;

        if circle.owner_id != caller_id {
            return Err(LanternError::Forbidden(
                "Only the circle owner can add members".to_string(),
            ));
        }

        self.db
            .get_user(member_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("User '{member_id}' not found")))?;

        let members = self.db.get_members_by_circle(circle_id).await?;
        if members.iter().any(|m| m.member_id == member_id) {
            return Err(LanternError::Conflict(format!(
                "User '{member_id}' is already a member of this circle"
            )));
        }

        let member = CircleMember::new(
            nanoid!(),
            circle_id.to_string(),
            member_id.to_string(),
            role,
        );
        self.db.create_member(&member).await?;

        Ok(member)
    }

    pub async fn members(&self, circle_id: &str) -> Result<Vec<CircleMember>> {
        self.db
            .get_circle(circle_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("Circle '{circle_id}' not found")))?;

        self.db.get_members_by_circle(circle_id).await
    }
}
