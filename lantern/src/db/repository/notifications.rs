use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{Notification, Pagination};

pub struct NotificationRepository;

impl NotificationRepository {
    pub async fn create(conn: &Connection, notification: &Notification) -> Result<()> {
        conn.execute(
            "INSERT INTO notifications (id, recipient_id, title, message, kind, is_read, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                notification.id.clone(),
                notification.recipient_id.clone(),
                notification.title.clone(),
                notification.message.clone(),
                notification.kind.to_string(),
                notification.is_read as i32,
                notification.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Notification>> {
        let mut rows = conn
            .query(
                "SELECT id, recipient_id, title, message, kind, is_read, created_at
                 FROM notifications WHERE id = ?1",
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_notification(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list_by_recipient(
        conn: &Connection,
        recipient_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Notification>, Pagination)> {
        let mut count_rows = conn
            .query(
                "SELECT COUNT(*) FROM notifications WHERE recipient_id = ?1",
                params![recipient_id],
            )
            .await?;
        let total: i64 = if let Some(row) = count_rows.next().await? {
            row.get(0)?
        } else {
            0
        };

        let offset = (page.saturating_sub(1)) * limit;
        let mut rows = conn
            .query(
                "SELECT id, recipient_id, title, message, kind, is_read, created_at
                 FROM notifications
                 WHERE recipient_id = ?1
                 ORDER BY created_at DESC
                 LIMIT ?2 OFFSET ?3",
                params![recipient_id, limit as i64, offset as i64],
            )
            .await?;

        let mut notifications = Vec::new();
        while let Some(row) = rows.next().await? {
            notifications.push(Self::row_to_notification(&row)?);
        }

        let pagination = Pagination::new(page, limit, total as u32);
        Ok((notifications, pagination))
    }

    pub async fn mark_read(conn: &Connection, id: &str) -> Result<bool> {
        let affected = conn
            .execute(
                "UPDATE notifications SET is_read = 1 WHERE id = ?1",
                params![id],
            )
            .await?;

        Ok(affected > 0)
    }

    pub fn row_to_notification(row: &libsql::Row) -> Result<Notification> {
        Ok(Notification {
            id: row.get(0)?,
            recipient_id: row.get(1)?,
            title: row.get(2)?,
            message: row.get(3)?,
            kind: row
                .get::<String>(4)?
                .parse()
                .unwrap_or(crate::models::NotificationKind::SosFriend),
            is_read: row.get::<i32>(5)? != 0,
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(6)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
