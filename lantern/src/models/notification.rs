use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SosFriend,
    SosCircle,
    SosResolved,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SosFriend => write!(f, "sos_friend"),
            Self::SosCircle => write!(f, "sos_circle"),
            Self::SosResolved => write!(f, "sos_resolved"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sos_friend" => Ok(Self::SosFriend),
            "sos_circle" => Ok(Self::SosCircle),
            "sos_resolved" => Ok(Self::SosResolved),
            _ => Err(format!("Unknown notification kind: {s}")),
        }
    }
}

/// A stored notification row. Delivery to devices is out of scope; clients
/// poll the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: String,
        recipient_id: String,
        title: String,
        message: String,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id,
            recipient_id,
            title,
            message,
            kind,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
