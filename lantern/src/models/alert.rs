use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Pending,
    #[default]
    Active,
    Resolved,
    FalseAlarm,
}

impl AlertStatus {
    /// Open alerts feed the map and the fan-out audience. Resolved and
    /// false-alarm alerts are history.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Resolved => write!(f, "resolved"),
            Self::FalseAlarm => write!(f, "false_alarm"),
        }
    }
}

impl std::str::FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "resolved" => Ok(Self::Resolved),
            "false_alarm" => Ok(Self::FalseAlarm),
            _ => Err(format!("Unknown alert status: {s}")),
        }
    }
}

/// An emergency signal emitted by one user at one location. The message is
/// bounded at creation time, so stored rows never exceed the notification
/// body limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SosAlert {
    pub id: String,
    pub sender_id: String,
    pub circle_id: Option<String>,
    pub message: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl SosAlert {
    pub fn new(id: String, sender_id: String, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            sender_id,
            circle_id: None,
            message: None,
            latitude,
            longitude,
            status: AlertStatus::Active,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }
}
