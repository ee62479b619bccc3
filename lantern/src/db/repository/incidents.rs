use chrono::{DateTime, Duration, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{NewsIncident, UserReportIncident};

pub struct ReportRepository;

impl ReportRepository {
    pub async fn create(conn: &Connection, report: &UserReportIncident) -> Result<()> {
        conn.execute(
            "INSERT INTO user_reports (
                id, reporter_id, title, description, category, latitude, longitude,
                severity, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                report.id.clone(),
                report.reporter_id.clone(),
                report.title.clone(),
                report.description.clone(),
                report.category.clone(),
                report.latitude,
                report.longitude,
                report.severity.map(|s| s as i64),
                report.status.to_string(),
                report.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    /// Active reports inside the bounding box of half-side `radius_deg`.
    pub async fn get_within_radius(
        conn: &Connection,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<UserReportIncident>> {
        let mut rows = conn
            .query(
                "SELECT id, reporter_id, title, description, category, latitude, longitude,
                        severity, status, created_at
                 FROM user_reports
                 WHERE status = 'active'
                   AND latitude BETWEEN ?1 AND ?2
                   AND longitude BETWEEN ?3 AND ?4
                 ORDER BY created_at DESC",
                params![
                    latitude - radius_deg,
                    latitude + radius_deg,
                    longitude - radius_deg,
                    longitude + radius_deg,
                ],
            )
            .await?;

        let mut reports = Vec::new();
        while let Some(row) = rows.next().await? {
            reports.push(Self::row_to_report(&row)?);
        }
        Ok(reports)
    }

    pub fn row_to_report(row: &libsql::Row) -> Result<UserReportIncident> {
        Ok(UserReportIncident {
            id: row.get(0)?,
            reporter_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            latitude: row.get(5)?,
            longitude: row.get(6)?,
            severity: row.get::<Option<i64>>(7)?.map(|s| s as u8),
            status: row.get::<String>(8)?.parse().unwrap_or_default(),
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(9)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

const NEWS_COLUMNS: &str = "id, title, summary, category, location_name, latitude, longitude, \
                            source_url, source_url_hash, published_at, severity, created_at, updated_at";

pub struct NewsRepository;

impl NewsRepository {
    pub async fn get_by_source_url_hash(
        conn: &Connection,
        hash: &str,
    ) -> Result<Option<NewsIncident>> {
        let mut rows = conn
            .query(
                &format!("SELECT {NEWS_COLUMNS} FROM news_incidents WHERE source_url_hash = ?1"),
                params![hash],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_news(&row)?))
        } else {
            Ok(None)
        }
    }

    /// Insert, or refresh the existing row for the same source URL. The
    /// stored `id` and `created_at` survive a refresh.
    pub async fn upsert_by_source_url(
        conn: &Connection,
        incident: &NewsIncident,
    ) -> Result<NewsIncident> {
        if let Some(existing) =
            Self::get_by_source_url_hash(conn, &incident.source_url_hash).await?
        {
            let updated_at = Utc::now();
            conn.execute(
                "UPDATE news_incidents
                 SET title = ?2, summary = ?3, category = ?4, location_name = ?5,
                     latitude = ?6, longitude = ?7, source_url = ?8, published_at = ?9,
                     severity = ?10, updated_at = ?11
                 WHERE id = ?1",
                params![
                    existing.id.clone(),
                    incident.title.clone(),
                    incident.summary.clone(),
                    incident.category.clone(),
                    incident.location_name.clone(),
                    incident.latitude,
                    incident.longitude,
                    incident.source_url.clone(),
                    incident.published_at.map(|dt| dt.to_rfc3339()),
                    incident.severity.map(|s| s as i64),
                    updated_at.to_rfc3339(),
                ],
            )
            .await?;

            return Ok(NewsIncident {
                id: existing.id,
                created_at: existing.created_at,
                updated_at,
                ..incident.clone()
            });
        }

        conn.execute(
            "INSERT INTO news_incidents (
                id, title, summary, category, location_name, latitude, longitude,
                source_url, source_url_hash, published_at, severity, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                incident.id.clone(),
                incident.title.clone(),
                incident.summary.clone(),
                incident.category.clone(),
                incident.location_name.clone(),
                incident.latitude,
                incident.longitude,
                incident.source_url.clone(),
                incident.source_url_hash.clone(),
                incident.published_at.map(|dt| dt.to_rfc3339()),
                incident.severity.map(|s| s as i64),
                incident.created_at.to_rfc3339(),
                incident.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(incident.clone())
    }

    /// News inside the bounding box, no older than `max_age_days` (by
    /// publication time when known, ingestion time otherwise).
    pub async fn get_within_radius(
        conn: &Connection,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
        max_age_days: i64,
    ) -> Result<Vec<NewsIncident>> {
        let cutoff = (Utc::now() - Duration::days(max_age_days)).to_rfc3339();
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {NEWS_COLUMNS} FROM news_incidents
                     WHERE latitude BETWEEN ?1 AND ?2
                       AND longitude BETWEEN ?3 AND ?4
                       AND COALESCE(published_at, created_at) >= ?5
                     ORDER BY created_at DESC"
                ),
                params![
                    latitude - radius_deg,
                    latitude + radius_deg,
                    longitude - radius_deg,
                    longitude + radius_deg,
                    cutoff,
                ],
            )
            .await?;

        let mut incidents = Vec::new();
        while let Some(row) = rows.next().await? {
            incidents.push(Self::row_to_news(&row)?);
        }
        Ok(incidents)
    }

    pub fn row_to_news(row: &libsql::Row) -> Result<NewsIncident> {
        Ok(NewsIncident {
            id: row.get(0)?,
            title: row.get(1)?,
            summary: row.get(2)?,
            category: row.get(3)?,
            location_name: row.get(4)?,
            latitude: row.get(5)?,
            longitude: row.get(6)?,
            source_url: row.get(7)?,
            source_url_hash: row.get(8)?,
            published_at: row
                .get::<Option<String>>(9)?
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            severity: row.get::<Option<i64>>(10)?.map(|s| s as u8),
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(11)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            updated_at: DateTime::parse_from_rfc3339(&row.get::<String>(12)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::UserRepository;
    use crate::db::schema;
    use crate::models::{ReportStatus, User};

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();
        schema::init_schema(&conn).await.unwrap();
        UserRepository::create(&conn, &User::new("u1".into(), "Alice".into()))
            .await
            .unwrap();
        conn
    }

    fn report(id: &str, lat: f64, lon: f64) -> UserReportIncident {
        UserReportIncident {
            id: id.into(),
            reporter_id: "u1".into(),
            title: "Broken streetlight".into(),
            description: "Dark corner".into(),
            category: "infrastructure".into(),
            latitude: lat,
            longitude: lon,
            severity: Some(40),
            status: ReportStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn news(id: &str, url: &str, lat: f64, lon: f64) -> NewsIncident {
        let now = Utc::now();
        NewsIncident {
            id: id.into(),
            title: "Road closure".into(),
            summary: "Flooding on Main St".into(),
            category: "weather".into(),
            location_name: "Main St".into(),
            latitude: lat,
            longitude: lon,
            source_url: url.into(),
            source_url_hash: crate::services::news::source_url_hash(url),
            published_at: Some(now),
            severity: Some(60),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_reports_within_radius_only_active() {
        let conn = setup_test_db().await;
        ReportRepository::create(&conn, &report("r1", 10.2, 20.2))
            .await
            .unwrap();
        let mut resolved = report("r2", 10.2, 20.2);
        resolved.status = ReportStatus::Resolved;
        ReportRepository::create(&conn, &resolved).await.unwrap();
        ReportRepository::create(&conn, &report("r3", 11.0, 20.0))
            .await
            .unwrap();

        let found = ReportRepository::get_within_radius(&conn, 10.0, 20.0, 0.5)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "r1");
        assert_eq!(found[0].severity, Some(40));
    }

    #[tokio::test]
    async fn test_news_upsert_preserves_identity() {
        let conn = setup_test_db().await;
        let first = NewsRepository::upsert_by_source_url(
            &conn,
            &news("n1", "https://example.com/a", 10.0, 20.0),
        )
        .await
        .unwrap();

        let mut refreshed = news("n2", "https://example.com/a", 10.1, 20.1);
        refreshed.title = "Road closure extended".into();
        let second = NewsRepository::upsert_by_source_url(&conn, &refreshed)
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.title, "Road closure extended");

        let mut rows = conn
            .query("SELECT count(*) FROM news_incidents", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_news_age_filter() {
        let conn = setup_test_db().await;
        let mut stale = news("n1", "https://example.com/old", 10.0, 20.0);
        stale.published_at = Some(Utc::now() - Duration::days(30));
        NewsRepository::upsert_by_source_url(&conn, &stale).await.unwrap();
        NewsRepository::upsert_by_source_url(&conn, &news("n2", "https://example.com/new", 10.0, 20.0))
            .await
            .unwrap();

        let found = NewsRepository::get_within_radius(&conn, 10.0, 20.0, 0.5, 7)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "n2");
    }
}
