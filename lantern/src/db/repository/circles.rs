use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{Circle, CircleMember, CircleStatus};

pub struct CircleRepository;

impl CircleRepository {
    pub async fn create(conn: &Connection, circle: &Circle) -> Result<()> {
        conn.execute(
            "INSERT INTO circles (id, name, description, owner_id, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                circle.id.clone(),
                circle.name.clone(),
                circle.description.clone(),
                circle.owner_id.clone(),
                circle.status.to_string(),
                circle.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Circle>> {
        let mut rows = conn
            .query(
                "SELECT id, name, description, owner_id, status, created_at
                 FROM circles WHERE id = ?1",
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_circle(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_by_owner(conn: &Connection, owner_id: &str) -> Result<Vec<Circle>> {
        let mut rows = conn
            .query(
                "SELECT id, name, description, owner_id, status, created_at
                 FROM circles WHERE owner_id = ?1
                 ORDER BY created_at DESC",
                params![owner_id],
            )
            .await?;

        let mut circles = Vec::new();
        while let Some(row) = rows.next().await? {
            circles.push(Self::row_to_circle(&row)?);
        }
        Ok(circles)
    }

    /// Newest active circle wins if the invariant was ever violated by
    /// out-of-band writes.
    pub async fn get_active_by_owner(conn: &Connection, owner_id: &str) -> Result<Option<Circle>> {
        let mut rows = conn
            .query(
                "SELECT id, name, description, owner_id, status, created_at
                 FROM circles WHERE owner_id = ?1 AND status = 'active'
                 ORDER BY created_at DESC LIMIT 1",
                params![owner_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_circle(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn set_status(conn: &Connection, id: &str, status: CircleStatus) -> Result<()> {
        conn.execute(
            "UPDATE circles SET status = ?2 WHERE id = ?1",
            params![id, status.to_string()],
        )
        .await?;

        Ok(())
    }

    pub fn row_to_circle(row: &libsql::Row) -> Result<Circle> {
        Ok(Circle {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            owner_id: row.get(3)?,
            status: row.get::<String>(4)?.parse().unwrap_or_default(),
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(5)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

pub struct CircleMemberRepository;

impl CircleMemberRepository {
    pub async fn create(conn: &Connection, member: &CircleMember) -> Result<()> {
        conn.execute(
            "INSERT INTO circle_members (id, circle_id, member_id, role, joined_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                member.id.clone(),
                member.circle_id.clone(),
                member.member_id.clone(),
                member.role.to_string(),
                member.joined_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_circle(conn: &Connection, circle_id: &str) -> Result<Vec<CircleMember>> {
        let mut rows = conn
            .query(
                "SELECT id, circle_id, member_id, role, joined_at
                 FROM circle_members WHERE circle_id = ?1
                 ORDER BY joined_at",
                params![circle_id],
            )
            .await?;

        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(Self::row_to_member(&row)?);
        }
        Ok(members)
    }

    pub async fn get_by_member(conn: &Connection, member_id: &str) -> Result<Vec<CircleMember>> {
        let mut rows = conn
            .query(
                "SELECT id, circle_id, member_id, role, joined_at
                 FROM circle_members WHERE member_id = ?1
                 ORDER BY joined_at",
                params![member_id],
            )
            .await?;

        let mut memberships = Vec::new();
        while let Some(row) = rows.next().await? {
            memberships.push(Self::row_to_member(&row)?);
        }
        Ok(memberships)
    }

    pub fn row_to_member(row: &libsql::Row) -> Result<CircleMember> {
        Ok(CircleMember {
            id: row.get(0)?,
            circle_id: row.get(1)?,
            member_id: row.get(2)?,
            role: row.get::<String>(3)?.parse().unwrap_or_default(),
            joined_at: DateTime::parse_from_rfc3339(&row.get::<String>(4)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
