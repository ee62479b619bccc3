use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::User;

pub struct UserRepository;

impl UserRepository {
    pub async fn create(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            "INSERT INTO users (id, display_name, avatar_url, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id.clone(),
                user.display_name.clone(),
                user.avatar_url.clone(),
                user.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<User>> {
        let mut rows = conn
            .query(
                "SELECT id, display_name, avatar_url, created_at FROM users WHERE id = ?1",
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_by_ids(conn: &Connection, ids: &[String]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut placeholders = String::new();
        for i in 0..ids.len() {
            if i > 0 {
                placeholders.push_str(", ");
            }
            placeholders.push('?');
            placeholders.push_str(&(i + 1).to_string());
        }

        let sql = format!(
            "SELECT id, display_name, avatar_url, created_at FROM users WHERE id IN ({placeholders})"
        );
        let params: Vec<libsql::Value> =
            ids.iter().map(|id| libsql::Value::from(id.clone())).collect();

        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_user(&row)?);
        }
        Ok(results)
    }

    pub fn row_to_user(row: &libsql::Row) -> Result<User> {
        Ok(User {
            id: row.get(0)?,
            display_name: row.get(1)?,
            avatar_url: row.get(2)?,
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(3)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
