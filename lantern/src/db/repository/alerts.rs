use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::SosAlert;

const ALERT_COLUMNS: &str =
    "id, sender_id, circle_id, message, latitude, longitude, status, created_at, resolved_at";

pub struct AlertRepository;

impl AlertRepository {
    pub async fn create(conn: &Connection, alert: &SosAlert) -> Result<()> {
        conn.execute(
            "INSERT INTO sos_alerts (
                id, sender_id, circle_id, message, latitude, longitude,
                status, created_at, resolved_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                alert.id.clone(),
                alert.sender_id.clone(),
                alert.circle_id.clone(),
                alert.message.clone(),
                alert.latitude,
                alert.longitude,
                alert.status.to_string(),
                alert.created_at.to_rfc3339(),
                alert.resolved_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<SosAlert>> {
        let mut rows = conn
            .query(
                &format!("SELECT {ALERT_COLUMNS} FROM sos_alerts WHERE id = ?1"),
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_alert(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_by_sender(conn: &Connection, sender_id: &str) -> Result<Vec<SosAlert>> {
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {ALERT_COLUMNS} FROM sos_alerts
                     WHERE sender_id = ?1 ORDER BY created_at DESC"
                ),
                params![sender_id],
            )
            .await?;

        let mut alerts = Vec::new();
        while let Some(row) = rows.next().await? {
            alerts.push(Self::row_to_alert(&row)?);
        }
        Ok(alerts)
    }

    /// Open alerts (pending or active) from any of the given senders.
    pub async fn get_open_by_sender_ids(
        conn: &Connection,
        sender_ids: &[String],
    ) -> Result<Vec<SosAlert>> {
        if sender_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut placeholders = String::new();
        for i in 0..sender_ids.len() {
            if i > 0 {
                placeholders.push_str(", ");
            }
            placeholders.push('?');
            placeholders.push_str(&(i + 1).to_string());
        }

        let sql = format!(
            "SELECT {ALERT_COLUMNS} FROM sos_alerts
             WHERE sender_id IN ({placeholders}) AND status IN ('pending', 'active')
             ORDER BY created_at DESC"
        );
        let params: Vec<libsql::Value> = sender_ids
            .iter()
            .map(|id| libsql::Value::from(id.clone()))
            .collect();

        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let mut alerts = Vec::new();
        while let Some(row) = rows.next().await? {
            alerts.push(Self::row_to_alert(&row)?);
        }
        Ok(alerts)
    }

    /// Open alerts inside the bounding box of half-side `radius_deg`.
    pub async fn get_open_within_radius(
        conn: &Connection,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<SosAlert>> {
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {ALERT_COLUMNS} FROM sos_alerts
                     WHERE status IN ('pending', 'active')
                       AND latitude BETWEEN ?1 AND ?2
                       AND longitude BETWEEN ?3 AND ?4
                     ORDER BY created_at DESC"
                ),
                params![
                    latitude - radius_deg,
                    latitude + radius_deg,
                    longitude - radius_deg,
                    longitude + radius_deg,
                ],
            )
            .await?;

        let mut alerts = Vec::new();
        while let Some(row) = rows.next().await? {
            alerts.push(Self::row_to_alert(&row)?);
        }
        Ok(alerts)
    }

    pub async fn update(conn: &Connection, alert: &SosAlert) -> Result<()> {
        conn.execute(
            "UPDATE sos_alerts
             SET circle_id = ?2, message = ?3, latitude = ?4, longitude = ?5,
                 status = ?6, resolved_at = ?7
             WHERE id = ?1",
            params![
                alert.id.clone(),
                alert.circle_id.clone(),
                alert.message.clone(),
                alert.latitude,
                alert.longitude,
                alert.status.to_string(),
                alert.resolved_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .await?;

        Ok(())
    }

    pub fn row_to_alert(row: &libsql::Row) -> Result<SosAlert> {
        Ok(SosAlert {
            id: row.get(0)?,
            sender_id: row.get(1)?,
            circle_id: row.get(2)?,
            message: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
            status: row.get::<String>(6)?.parse().unwrap_or_default(),
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(7)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            resolved_at: row
                .get::<Option<String>>(8)?
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::UserRepository;
    use crate::db::schema;
    use crate::models::{AlertStatus, User};

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();
        schema::init_schema(&conn).await.unwrap();

        for (id, name) in [("u1", "Alice"), ("u2", "Bob"), ("u3", "Charlie")] {
            UserRepository::create(&conn, &User::new(id.into(), name.into()))
                .await
                .unwrap();
        }
        conn
    }

    fn alert(id: &str, sender: &str, lat: f64, lon: f64) -> SosAlert {
        SosAlert::new(id.into(), sender.into(), lat, lon)
    }

    #[tokio::test]
    async fn test_open_by_sender_ids_excludes_resolved() {
        let conn = setup_test_db().await;
        AlertRepository::create(&conn, &alert("a1", "u1", 10.0, 20.0))
            .await
            .unwrap();

        let mut resolved = alert("a2", "u1", 10.0, 20.0);
        resolved.status = AlertStatus::Resolved;
        resolved.resolved_at = Some(Utc::now());
        AlertRepository::create(&conn, &resolved).await.unwrap();

        let open = AlertRepository::get_open_by_sender_ids(&conn, &["u1".to_string()])
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, "a1");
    }

    #[tokio::test]
    async fn test_open_by_sender_ids_empty_input() {
        let conn = setup_test_db().await;
        let open = AlertRepository::get_open_by_sender_ids(&conn, &[]).await.unwrap();
        assert!(open.is_empty());
    }

    #[tokio::test]
    async fn test_within_radius_bounding_box() {
        let conn = setup_test_db().await;
        AlertRepository::create(&conn, &alert("near", "u1", 10.3, 20.3))
            .await
            .unwrap();
        AlertRepository::create(&conn, &alert("far", "u2", 10.6, 20.0))
            .await
            .unwrap();

        let nearby = AlertRepository::get_open_within_radius(&conn, 10.0, 20.0, 0.5)
            .await
            .unwrap();
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].id, "near");
    }

    #[tokio::test]
    async fn test_update_round_trips_resolution() {
        let conn = setup_test_db().await;
        let mut a = alert("a1", "u1", 10.0, 20.0);
        AlertRepository::create(&conn, &a).await.unwrap();

        a.status = AlertStatus::Resolved;
        a.resolved_at = Some(Utc::now());
        AlertRepository::update(&conn, &a).await.unwrap();

        let found = AlertRepository::get_by_id(&conn, "a1").await.unwrap().unwrap();
        assert_eq!(found.status, AlertStatus::Resolved);
        assert!(found.resolved_at.is_some());
    }
}
