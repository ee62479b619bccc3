use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person known to the service. Account lifecycle lives outside this
/// service; rows exist here so alerts and notifications can resolve names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String, display_name: String) -> Self {
        Self {
            id,
            display_name,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }
}
