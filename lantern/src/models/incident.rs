use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Active,
    Resolved,
    Invalid,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Resolved => write!(f, "resolved"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "resolved" => Ok(Self::Resolved),
            "invalid" => Ok(Self::Invalid),
            _ => Err(format!("Unknown report status: {s}")),
        }
    }
}

/// A hazard reported directly by a user. No approval workflow; only
/// `active` reports surface on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReportIncident {
    pub id: String,
    pub reporter_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: Option<u8>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// A hazard derived from a news source. Identity for upserts is the
/// SHA-256 of the source URL, so re-ingesting an article refreshes the row
/// instead of duplicating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsIncident {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub source_url: String,
    pub source_url_hash: String,
    pub published_at: Option<DateTime<Utc>>,
    pub severity: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_round_trip() {
        for status in [
            ReportStatus::Active,
            ReportStatus::Resolved,
            ReportStatus::Invalid,
        ] {
            let parsed: ReportStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("spam".parse::<ReportStatus>().is_err());
    }
}
