use std::sync::Arc;

use chrono::{DateTime, Utc};
use nanoid::nanoid;
use sha2::{Digest, Sha256};
use url::Url;

use crate::db::SafetyBackend;
use crate::error::{LanternError, Result};
use crate::geo::{self, GeoPoint};
use crate::geocode::GeocodeClient;
use crate::models::NewsIncident;

/// Hex SHA-256 of the raw source URL string. This is the upsert identity
/// for news rows, so the same article never duplicates.
pub fn source_url_hash(source_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// One item of an ingest batch, as delivered by a scraper or feed job.
/// Coordinates win over the place name when both are present.
#[derive(Debug, Clone)]
pub struct NewsIngestItem {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub source_url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub severity: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub ingested: Vec<NewsIncident>,
    pub skipped_no_location: u32,
}

/// Turns scraped news items into map rows. Items that cannot be placed on
/// the map are counted and skipped; a failing geocoder upstream fails the
/// batch.
#[derive(Clone)]
pub struct NewsService {
    db: Arc<dyn SafetyBackend>,
    geocoder: Option<GeocodeClient>,
}

impl NewsService {
    pub fn new(db: Arc<dyn SafetyBackend>, geocoder: Option<GeocodeClient>) -> Self {
        Self { db, geocoder }
    }

    pub async fn ingest(&self, items: Vec<NewsIngestItem>) -> Result<IngestSummary> {
        let mut ingested = Vec::new();
        let mut skipped_no_location = 0u32;

        for item in items {
            Url::parse(&item.source_url).map_err(|error| {
                LanternError::InvalidArgument(format!(
                    "invalid source URL '{}': {error}",
                    item.source_url
                ))
            })?;
            if let Some(severity) = item.severity {
                if severity > 100 {
                    return Err(LanternError::InvalidArgument(format!(
                        "severity must be within [0, 100], got {severity}"
                    )));
                }
            }

            let Some(point) = self.locate(&item).await? else {
                skipped_no_location += 1;
                tracing::warn!(
                    source_url = %item.source_url,
                    "Skipping news item without a resolvable location"
                );
                continue;
            };

            let now = Utc::now();
            let incident = NewsIncident {
                id: nanoid!(),
                title: item.title,
                summary: item.summary,
                category: item.category,
                location_name: item.location_name.unwrap_or_default(),
                latitude: point.latitude,
                longitude: point.longitude,
                source_url_hash: source_url_hash(&item.source_url),
                source_url: item.source_url,
                published_at: item.published_at,
                severity: item.severity,
                created_at: now,
                updated_at: now,
            };
            ingested.push(self.db.upsert_news_by_source_url(&incident).await?);
        }

        tracing::info!(
            ingested = ingested.len(),
            skipped_no_location = skipped_no_location,
            "News ingest finished"
        );
        Ok(IngestSummary {
            ingested,
            skipped_no_location,
        })
    }

    /// Explicit coordinates win; otherwise geocode the place name when a
    /// geocoder is configured. `Ok(None)` means the item has no usable
    /// location and should be skipped.
    async fn locate(&self, item: &NewsIngestItem) -> Result<Option<GeoPoint>> {
        if let (Some(latitude), Some(longitude)) = (item.latitude, item.longitude) {
            geo::validate_point(latitude, longitude)?;
            return Ok(Some(GeoPoint::new(latitude, longitude)));
        }

        match (&self.geocoder, item.location_name.as_deref()) {
            (Some(client), Some(name)) if !name.trim().is_empty() => client.geocode(name).await,
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_url_hash_is_stable_hex_sha256() {
        let hash = source_url_hash("https://example.com/article");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, source_url_hash("https://example.com/article"));
        assert_ne!(hash, source_url_hash("https://example.com/other"));
    }

    #[test]
    fn test_source_url_hash_known_value() {
        // sha256("") is the well-known empty digest.
        assert_eq!(
            source_url_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
